//! Stream pipeline steps.
//!
//! A [`StreamStep`] maps a whole input stream to an output stream. It is
//! the most general variant: scalar sync and async steps both lift into it
//! element-wise, so one stream pipeline can mix all three kinds of stage.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_core::Stream;
use futures_util::future::FutureExt;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::async_step::AsyncStep;
use crate::step::{short_type_name, Step};

/// The stream type flowing between stages: a boxed, sendable stream with
/// a `'static` lifetime. Every stage input and output erases to this.
pub type PipeStream<T> = BoxStream<'static, T>;

/// A StreamStep represents a stream transformation: a function from a
/// whole stream of I to a stream of O. Stages may reorder, drop, buffer,
/// or expand elements; the scalar variants cannot.
pub struct StreamStep<I, O> {
    f: Arc<dyn Fn(PipeStream<I>) -> PipeStream<O> + Send + Sync + 'static>,
    name: Arc<str>,
}

impl<I, O> Clone for StreamStep<I, O> {
    fn clone(&self) -> Self {
        StreamStep {
            f: Arc::clone(&self.f),
            name: Arc::clone(&self.name),
        }
    }
}

impl<I, O> StreamStep<I, O> {
    /// Create a stream step from a stream transformation function.
    pub fn new<F, S>(f: F) -> Self
    where
        F: Fn(PipeStream<I>) -> S + Send + Sync + 'static,
        S: Stream<Item = O> + Send + 'static,
    {
        let name = short_type_name::<F>().into();
        StreamStep {
            f: Arc::new(move |input| f(input).boxed()),
            name,
        }
    }

    /// Create a stream step from an async function that resolves to the
    /// output stream. The future is flattened: its stream's elements
    /// become the stage's output.
    pub fn from_async<F, Fut, S>(f: F) -> Self
    where
        F: Fn(PipeStream<I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = S> + Send + 'static,
        S: Stream<Item = O> + Send + 'static,
    {
        let name = short_type_name::<F>().into();
        StreamStep {
            f: Arc::new(move |input| f(input).flatten_stream().boxed()),
            name,
        }
    }

    /// Create a stream step from an async function that consumes the whole
    /// input and resolves to a single value. The result is emitted as a
    /// one-element stream, so folds and drains can sit mid-pipeline.
    pub fn from_sink<F, Fut>(f: F) -> Self
    where
        F: Fn(PipeStream<I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
    {
        let name = short_type_name::<F>().into();
        StreamStep {
            f: Arc::new(move |input| f(input).into_stream().boxed()),
            name,
        }
    }

    /// Create a stream step from an async function that consumes the whole
    /// input and resolves to a plain iterable. Its elements become the
    /// stage's output, in order.
    pub fn from_async_iter<F, Fut, It>(f: F) -> Self
    where
        F: Fn(PipeStream<I>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = It> + Send + 'static,
        It: IntoIterator<Item = O> + 'static,
        It::IntoIter: Send + 'static,
    {
        let name = short_type_name::<F>().into();
        StreamStep {
            f: Arc::new(move |input| f(input).map(stream::iter).flatten_stream().boxed()),
            name,
        }
    }

    /// Run the input stream through this step. Like the scalar variants,
    /// this is lazy: elements are only pulled when the returned stream is.
    pub fn apply<S>(&self, input: S) -> PipeStream<O>
    where
        S: Stream<Item = I> + Send + 'static,
    {
        (self.f)(input.boxed())
    }

    /// The step's label, as shown by `Debug`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the step's label.
    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Link this step with another stage. Scalar steps and closures are
    /// lifted to stream stages first, then the two are chained.
    pub fn pipe<P, N>(self, next: N) -> StreamStep<I, P>
    where
        N: IntoStreamStep<O, P>,
        I: Send + 'static,
        O: Send + 'static,
        P: Send + 'static,
    {
        compose(self, next)
    }

    /// Reduce this step to an ordinary stream transformation closure.
    pub fn into_fn(self) -> impl Fn(PipeStream<I>) -> PipeStream<O> + Clone + Send + Sync + 'static
    where
        I: 'static,
        O: 'static,
    {
        move |input| (self.f)(input)
    }
}

impl<I, O> fmt::Debug for StreamStep<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StreamStep({})", self.name)
    }
}

/// Wrap a stream transformation as a [`StreamStep`]. Shorthand for
/// [`StreamStep::new`].
pub fn stream_step<F, S, I, O>(f: F) -> StreamStep<I, O>
where
    F: Fn(PipeStream<I>) -> S + Send + Sync + 'static,
    S: Stream<Item = O> + Send + 'static,
{
    StreamStep::new(f)
}

/// The identity stream step: passes the stream through untouched.
pub fn identity<T>() -> StreamStep<T, T>
where
    T: Send + 'static,
{
    StreamStep {
        f: Arc::new(|input: PipeStream<T>| input),
        name: "identity".into(),
    }
}

/// Link two stream stages into one. Operands may be stream steps, scalar
/// steps (lifted element-wise), or closures over whole streams.
pub fn compose<I, M, O>(
    left: impl IntoStreamStep<I, M>,
    right: impl IntoStreamStep<M, O>,
) -> StreamStep<I, O>
where
    I: Send + 'static,
    M: Send + 'static,
    O: Send + 'static,
{
    let left = left.into_stream_step();
    let right = right.into_stream_step();
    let name: Arc<str> = format!("{} | {}", left.name, right.name).into();
    let lf = left.f;
    let rf = right.f;
    StreamStep {
        f: Arc::new(move |input: PipeStream<I>| rf(lf(input))),
        name,
    }
}

/// Conversion into a [`StreamStep`]: the stream variant's normalization
/// rule, checked in fixed priority order.
///
/// A `StreamStep` passes through untouched. An [`AsyncStep`] is lifted to
/// run once per element, awaited in order. A sync [`Step`] is lifted to a
/// plain element-wise map. A closure must take and return streams; scalar
/// closures go through [`crate::step::step`] or
/// [`crate::async_step::async_step`] first. Anything else fails to
/// compile.
pub trait IntoStreamStep<I, O> {
    fn into_stream_step(self) -> StreamStep<I, O>;
}

impl<I, O> IntoStreamStep<I, O> for StreamStep<I, O> {
    fn into_stream_step(self) -> StreamStep<I, O> {
        self
    }
}

impl<I, O> IntoStreamStep<I, O> for AsyncStep<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn into_stream_step(self) -> StreamStep<I, O> {
        log::trace!("lifting async step '{}' into a stream step", self.name());
        let name: Arc<str> = Arc::from(self.name());
        StreamStep {
            f: Arc::new(move |input: PipeStream<I>| {
                let step = self.clone();
                input.then(move |item| step.apply(item)).boxed()
            }),
            name,
        }
    }
}

impl<I, O> IntoStreamStep<I, O> for Step<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn into_stream_step(self) -> StreamStep<I, O> {
        log::trace!("lifting sync step '{}' into a stream step", self.name());
        let name: Arc<str> = Arc::from(self.name());
        StreamStep {
            f: Arc::new(move |input: PipeStream<I>| {
                let step = self.clone();
                input.map(move |item| step.apply(item)).boxed()
            }),
            name,
        }
    }
}

impl<F, S, I, O> IntoStreamStep<I, O> for F
where
    F: Fn(PipeStream<I>) -> S + Send + Sync + 'static,
    S: Stream<Item = O> + Send + 'static,
{
    fn into_stream_step(self) -> StreamStep<I, O> {
        StreamStep::new(self)
    }
}
