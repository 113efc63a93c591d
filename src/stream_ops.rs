//! Ready-made stream stages.
//!
//! Each function here builds a [`StreamStep`], so the results chain with
//! [`crate::stream_step::compose`] and accept scalar steps where a mapper
//! or predicate is expected. `map` and `filter` run async stages per
//! element; the `_sync` forms skip the future machinery entirely.

use std::future::Future;

use async_stream::stream;
use futures::stream::StreamExt;
use futures_util::pin_mut;

use crate::async_step::IntoAsyncStep;
use crate::stream_step::{PipeStream, StreamStep};

/// A stage that applies an async scalar stage to each element, one at a
/// time, preserving order.
pub fn map<T, U>(stage: impl IntoAsyncStep<T, U>) -> StreamStep<T, U>
where
    T: Send + 'static,
    U: Send + 'static,
{
    let stage = stage.into_async_step();
    let name = format!("map({})", stage.name());
    StreamStep::new(move |input: PipeStream<T>| {
        let stage = stage.clone();
        input.then(move |item| stage.apply(item))
    })
    .named(name)
}

/// A stage that keeps the elements an async scalar predicate accepts.
/// The predicate takes its input by value, so elements are cloned to
/// test.
pub fn filter<T>(predicate: impl IntoAsyncStep<T, bool>) -> StreamStep<T, T>
where
    T: Clone + Send + 'static,
{
    let predicate = predicate.into_async_step();
    let name = format!("filter({})", predicate.name());
    StreamStep::new(move |input: PipeStream<T>| {
        let keep = predicate.clone();
        stream! {
            let mut s = input;
            while let Some(item) = s.next().await {
                if keep.apply(item.clone()).await {
                    yield item;
                }
            }
        }
    })
    .named(name)
}

/// A stage that applies a plain function to each element.
pub fn map_sync<T, U, F>(f: F) -> StreamStep<T, U>
where
    F: Fn(T) -> U + Send + Sync + Clone + 'static,
    T: Send + 'static,
    U: Send + 'static,
{
    StreamStep::new(move |input: PipeStream<T>| {
        let f = f.clone();
        input.map(move |item| f(item))
    })
    .named("map_sync")
}

/// A stage that keeps the elements a borrowing predicate accepts.
pub fn filter_sync<T, F>(predicate: F) -> StreamStep<T, T>
where
    F: Fn(&T) -> bool + Send + Sync + Clone + 'static,
    T: Send + 'static,
{
    StreamStep::new(move |input: PipeStream<T>| {
        let predicate = predicate.clone();
        stream! {
            let mut s = input;
            while let Some(item) = s.next().await {
                if predicate(&item) {
                    yield item;
                }
            }
        }
    })
    .named("filter_sync")
}

/// A stage that folds the whole input into one value and emits it as a
/// single-element stream.
pub fn fold<T, A, F, Fut>(init: A, f: F) -> StreamStep<T, A>
where
    T: Send + 'static,
    A: Clone + Send + Sync + 'static,
    F: Fn(A, T) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = A> + Send + 'static,
{
    StreamStep::from_sink(move |input: PipeStream<T>| {
        let f = f.clone();
        input.fold(init.clone(), move |acc, item| f(acc, item))
    })
    .named("fold")
}

/// A stage that passes through the first `n` elements, then ends the
/// stream.
pub fn take<T>(n: usize) -> StreamStep<T, T>
where
    T: Send + 'static,
{
    StreamStep::new(move |input: PipeStream<T>| input.take(n)).named(format!("take({})", n))
}

/// A stage that ends the stream as soon as the signal future resolves.
/// The factory runs once per application, so the stage stays reusable.
/// The signal is polled first, so a resolved signal wins over a ready
/// element.
pub fn interrupt_when<T, F, Fut>(signal: F) -> StreamStep<T, T>
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    StreamStep::new(move |input: PipeStream<T>| {
        let signal = signal();
        stream! {
            pin_mut!(signal);
            let mut s = input;
            loop {
                tokio::select! {
                    biased;
                    _ = &mut signal => {
                        log::debug!("stream stage interrupted by signal");
                        break;
                    },

                    maybe_item = s.next() => {
                        match maybe_item {
                            Some(item) => yield item,
                            None => break,
                        }
                    },
                }
            }
        }
    })
    .named("interrupt_when")
}
