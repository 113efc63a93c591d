//! Iterator stages for synchronous pipelines.
//!
//! These build [`Step`]s over boxed iterators, so element-wise work can be
//! expressed without touching the async stack. The async counterparts live
//! in [`crate::stream_ops`].

use crate::step::{IntoStep, Step};

/// The iterator type flowing between sync stages.
pub type PipeIter<T> = Box<dyn Iterator<Item = T> + Send + 'static>;

/// Box an iterator so it can enter a sync iterator pipeline.
pub fn iter<I, T>(src: I) -> PipeIter<T>
where
    I: IntoIterator<Item = T>,
    <I as IntoIterator>::IntoIter: Send + 'static,
    T: 'static,
{
    Box::new(src.into_iter())
}

/// A stage that applies a scalar step to each element.
pub fn map<T, U>(stage: impl IntoStep<T, U>) -> Step<PipeIter<T>, PipeIter<U>>
where
    T: 'static,
    U: 'static,
{
    let stage = stage.into_step();
    let name = format!("map({})", stage.name());
    Step::new(move |input: PipeIter<T>| -> PipeIter<U> {
        let f = stage.clone().into_fn();
        Box::new(input.map(f))
    })
    .named(name)
}

/// A stage that keeps the elements a scalar predicate accepts. The
/// predicate takes its input by value, so elements are cloned to test.
pub fn filter<T>(predicate: impl IntoStep<T, bool>) -> Step<PipeIter<T>, PipeIter<T>>
where
    T: Clone + 'static,
{
    let predicate = predicate.into_step();
    let name = format!("filter({})", predicate.name());
    Step::new(move |input: PipeIter<T>| -> PipeIter<T> {
        let keep = predicate.clone().into_fn();
        Box::new(input.filter(move |item| keep(item.clone())))
    })
    .named(name)
}
