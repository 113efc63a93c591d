//! Bound function steps: currying for multi-parameter functions.
//!
//! A pipeline stage takes exactly one input, but many useful functions
//! take extras. [`wrap`] turns such a function into a [`FnStep`];
//! [`FnStep::bind`] fixes the extra parameters one at a time, left to
//! right, after the pipeline input. Once every extra parameter is bound,
//! the value converts into whichever step variant matches the function's
//! return type.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::stream::Stream;

use crate::async_step::{AsyncStep, IntoAsyncStep};
use crate::step::{short_type_name, IntoStep, Step};
use crate::stream_step::{IntoStreamStep, PipeStream, StreamStep};

/// A function callable with a pipeline input plus a tuple of bound
/// arguments. Implemented for functions of the shape
/// `f(input)`, `f(input, a)`, `f(input, a, b)` and `f(input, a, b, c)`.
pub trait StepFn<I, Args> {
    type Out;

    fn call_with(&self, input: I, args: Args) -> Self::Out;
}

impl<F, I, O> StepFn<I, ()> for F
where
    F: Fn(I) -> O,
{
    type Out = O;

    fn call_with(&self, input: I, _args: ()) -> O {
        self(input)
    }
}

impl<F, I, A, O> StepFn<I, (A,)> for F
where
    F: Fn(I, A) -> O,
{
    type Out = O;

    fn call_with(&self, input: I, args: (A,)) -> O {
        self(input, args.0)
    }
}

impl<F, I, A, B, O> StepFn<I, (A, B)> for F
where
    F: Fn(I, A, B) -> O,
{
    type Out = O;

    fn call_with(&self, input: I, args: (A, B)) -> O {
        self(input, args.0, args.1)
    }
}

impl<F, I, A, B, C, O> StepFn<I, (A, B, C)> for F
where
    F: Fn(I, A, B, C) -> O,
{
    type Out = O;

    fn call_with(&self, input: I, args: (A, B, C)) -> O {
        self(input, args.0, args.1, args.2)
    }
}

/// Tuple extension, one element at a time. Supports up to three bound
/// arguments, matching the arities of [`StepFn`].
pub trait Append<T> {
    type Out;

    fn append(self, value: T) -> Self::Out;
}

impl<T> Append<T> for () {
    type Out = (T,);

    fn append(self, value: T) -> (T,) {
        (value,)
    }
}

impl<T, A> Append<T> for (A,) {
    type Out = (A, T);

    fn append(self, value: T) -> (A, T) {
        (self.0, value)
    }
}

impl<T, A, B> Append<T> for (A, B) {
    type Out = (A, B, T);

    fn append(self, value: T) -> (A, B, T) {
        (self.0, self.1, value)
    }
}

/// A function with zero or more of its trailing parameters bound.
///
/// Binding never mutates: [`FnStep::bind`] returns a new value and leaves
/// the original usable, so one wrapped function can seed many differently
/// configured stages.
pub struct FnStep<F, B> {
    f: Arc<F>,
    bound: B,
    name: Arc<str>,
}

impl<F, B: Clone> Clone for FnStep<F, B> {
    fn clone(&self) -> Self {
        FnStep {
            f: Arc::clone(&self.f),
            bound: self.bound.clone(),
            name: Arc::clone(&self.name),
        }
    }
}

impl<F, B> FnStep<F, B> {
    /// Bind the next unbound parameter to `value`.
    pub fn bind<T>(&self, value: T) -> FnStep<F, B::Out>
    where
        B: Append<T> + Clone,
    {
        FnStep {
            f: Arc::clone(&self.f),
            bound: self.bound.clone().append(value),
            name: Arc::clone(&self.name),
        }
    }

    /// Call the function directly with a pipeline input. Only available
    /// once the bound tuple matches the function's trailing parameters.
    pub fn apply<I>(&self, input: I) -> F::Out
    where
        F: StepFn<I, B>,
        B: Clone,
    {
        self.f.call_with(input, self.bound.clone())
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
}

impl<F, B> fmt::Debug for FnStep<F, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnStep({})", self.name)
    }
}

/// Wrap a multi-parameter function for later binding.
///
/// # Examples
/// ```
/// use pipework::{step, wrap};
///
/// fn scale(x: i64, factor: i64) -> i64 {
///     x * factor
/// }
///
/// let by_two = wrap(scale).bind(2);
/// let by_ten = wrap(scale).bind(10);
/// let pipeline = pipework::step::compose(by_two, step(|x: i64| x + 1));
/// assert_eq!(pipeline.apply(4), 9);
/// assert_eq!(by_ten.apply(4), 40);
/// ```
pub fn wrap<F>(f: F) -> FnStep<F, ()> {
    let name = short_type_name::<F>().into();
    FnStep {
        f: Arc::new(f),
        bound: (),
        name,
    }
}

impl<F, B, I, O> IntoStep<I, O> for FnStep<F, B>
where
    F: StepFn<I, B, Out = O> + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
{
    fn into_step(self) -> Step<I, O> {
        let FnStep { f, bound, name } = self;
        Step::new(move |input: I| f.call_with(input, bound.clone())).named(name)
    }
}

impl<F, B, Fut, I, O> IntoAsyncStep<I, O> for FnStep<F, B>
where
    F: StepFn<I, B, Out = Fut> + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
    B: Clone + Send + Sync + 'static,
{
    fn into_async_step(self) -> AsyncStep<I, O> {
        let FnStep { f, bound, name } = self;
        AsyncStep::new(move |input: I| f.call_with(input, bound.clone())).named(name)
    }
}

impl<F, B, S, I, O> IntoStreamStep<I, O> for FnStep<F, B>
where
    F: StepFn<PipeStream<I>, B, Out = S> + Send + Sync + 'static,
    S: Stream<Item = O> + Send + 'static,
    B: Clone + Send + Sync + 'static,
{
    fn into_stream_step(self) -> StreamStep<I, O> {
        let FnStep { f, bound, name } = self;
        StreamStep::new(move |input: PipeStream<I>| f.call_with(input, bound.clone())).named(name)
    }
}
