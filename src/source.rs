//! Stream sources: the entry points that feed stream pipelines.
//!
//! Everything here produces a [`PipeStream`], so sources plug straight
//! into [`crate::stream_step::StreamStep::apply`].

use std::future::Future;

use futures::future;
use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::stream_step::PipeStream;

/// Errors from feeding a channel-backed source.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("pipeline inlet is closed")]
    Closed,

    #[error("pipeline inlet is full")]
    Full,
}

pub type ChannelResult<T> = Result<T, ChannelError>;

/// Emit a single element.
pub fn emit<T>(item: T) -> PipeStream<T>
where
    T: Send + 'static,
{
    stream::once(future::ready(item)).boxed()
}

/// A source that completes immediately without emitting.
pub fn empty<T>() -> PipeStream<T>
where
    T: Send + 'static,
{
    stream::empty().boxed()
}

/// Emit every element of an iterator, in order.
pub fn from_iter<I, T>(iter: I) -> PipeStream<T>
where
    I: IntoIterator<Item = T> + Send + 'static,
    <I as IntoIterator>::IntoIter: Send,
    T: Send + 'static,
{
    stream::iter(iter).boxed()
}

/// Evaluate a future and emit its output as the only element.
pub fn eval<F, T>(fut: F) -> PipeStream<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    stream::once(fut).boxed()
}

/// Evaluate futures from an iterator one at a time, emitting each output
/// in order.
pub fn eval_iter<I, F, T>(iter: I) -> PipeStream<T>
where
    I: IntoIterator<Item = F> + Send + 'static,
    <I as IntoIterator>::IntoIter: Send,
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    stream::iter(iter).then(|fut| fut).boxed()
}

/// A bounded channel source: the returned [`Inlet`] pushes elements in
/// from outside (other tasks, callbacks), the returned stream feeds them
/// to a pipeline. The stream ends once every inlet clone is dropped.
pub fn channel<T>(capacity: usize) -> (Inlet<T>, PipeStream<T>)
where
    T: Send + 'static,
{
    let (sender, receiver) = mpsc::channel(capacity);
    (Inlet { sender }, ReceiverStream::new(receiver).boxed())
}

/// The producer half of [`channel`].
pub struct Inlet<T> {
    sender: mpsc::Sender<T>,
}

impl<T> Clone for Inlet<T> {
    fn clone(&self) -> Self {
        Inlet {
            sender: self.sender.clone(),
        }
    }
}

impl<T> Inlet<T> {
    /// Push an element, waiting for capacity if the channel is full.
    pub async fn send(&self, item: T) -> ChannelResult<()> {
        self.sender.send(item).await.map_err(|_| {
            log::debug!("send on a closed pipeline inlet");
            ChannelError::Closed
        })
    }

    /// Push an element without waiting.
    pub fn try_send(&self, item: T) -> ChannelResult<()> {
        match self.sender.try_send(item) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => Err(ChannelError::Full),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(ChannelError::Closed),
        }
    }

    /// True once the consuming stream has been dropped.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}
