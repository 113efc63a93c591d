//! Asynchronous scalar pipeline steps.
//!
//! An [`AsyncStep`] maps one value to a future of another. Applying a
//! composed chain awaits each stage in order, left to right, and never
//! starts until the returned future is polled.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};

use crate::step::{short_type_name, Step};

/// An AsyncStep represents an asynchronous transformation from one type to
/// another: a function from I to a future of O. Futures produced by the
/// step are boxed, so chains of any length share one concrete type.
pub struct AsyncStep<I, O> {
    f: Arc<dyn Fn(I) -> BoxFuture<'static, O> + Send + Sync + 'static>,
    name: Arc<str>,
}

impl<I, O> Clone for AsyncStep<I, O> {
    fn clone(&self) -> Self {
        AsyncStep {
            f: Arc::clone(&self.f),
            name: Arc::clone(&self.name),
        }
    }
}

impl<I, O> AsyncStep<I, O> {
    /// Create a new async step from an async function (or any function
    /// returning a future).
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = O> + Send + 'static,
    {
        let name = short_type_name::<F>().into();
        AsyncStep {
            f: Arc::new(move |input| f(input).boxed()),
            name,
        }
    }

    /// Apply this step to a value, producing the future of the result.
    /// Nothing executes until the future is awaited.
    pub fn apply(&self, input: I) -> BoxFuture<'static, O> {
        (self.f)(input)
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

    /// Link this step with another: the result awaits `self`, then feeds
    /// the output to `next`. Sync steps and plain closures on either side
    /// are lifted automatically.
    pub fn pipe<P, N>(self, next: N) -> AsyncStep<I, P>
    where
        N: IntoAsyncStep<O, P>,
        I: Send + 'static,
        O: Send + 'static,
        P: Send + 'static,
    {
        compose(self, next)
    }

    /// Reduce this step to an ordinary async closure, detached from the
    /// pipeline machinery.
    pub fn into_fn(self) -> impl Fn(I) -> BoxFuture<'static, O> + Clone + Send + Sync + 'static
    where
        I: 'static,
        O: 'static,
    {
        move |input| (self.f)(input)
    }
}

impl<I, O> fmt::Debug for AsyncStep<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsyncStep({})", self.name)
    }
}

/// Wrap an async function as an [`AsyncStep`]. Shorthand for
/// [`AsyncStep::new`].
pub fn async_step<F, Fut, I, O>(f: F) -> AsyncStep<I, O>
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
{
    AsyncStep::new(f)
}

/// The async identity step: resolves immediately to its input.
pub fn identity<T>() -> AsyncStep<T, T>
where
    T: Send + 'static,
{
    AsyncStep::new(|input: T| async move { input }).named("identity")
}

/// Link two async stages into one. Either operand may also be a sync
/// [`Step`] or a plain closure; both are lifted before linking, so mixed
/// chains normalize to a single [`AsyncStep`].
pub fn compose<I, M, O>(
    left: impl IntoAsyncStep<I, M>,
    right: impl IntoAsyncStep<M, O>,
) -> AsyncStep<I, O>
where
    I: Send + 'static,
    M: Send + 'static,
    O: Send + 'static,
{
    let left = left.into_async_step();
    let right = right.into_async_step();
    let name: Arc<str> = format!("{} | {}", left.name, right.name).into();
    let lf = left.f;
    let rf = right.f;
    AsyncStep {
        f: Arc::new(move |input: I| {
            let lf = Arc::clone(&lf);
            let rf = Arc::clone(&rf);
            async move {
                let mid = lf(input).await;
                rf(mid).await
            }
            .boxed()
        }),
        name,
    }
}

/// Conversion into an [`AsyncStep`]: the async variant's normalization
/// rule, checked in fixed priority order.
///
/// An `AsyncStep` passes through untouched. A sync [`Step`] is lifted so
/// its function runs inside the resulting future. A plain closure must
/// itself return a future; sync closures are wrapped with
/// [`crate::step::step`] first. Anything else fails to compile.
pub trait IntoAsyncStep<I, O> {
    fn into_async_step(self) -> AsyncStep<I, O>;
}

impl<I, O> IntoAsyncStep<I, O> for AsyncStep<I, O> {
    fn into_async_step(self) -> AsyncStep<I, O> {
        self
    }
}

impl<I, O> IntoAsyncStep<I, O> for Step<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn into_async_step(self) -> AsyncStep<I, O> {
        log::trace!("lifting sync step '{}' into an async step", self.name());
        let name: Arc<str> = Arc::from(self.name());
        AsyncStep {
            f: Arc::new(move |input: I| {
                let step = self.clone();
                async move { step.apply(input) }.boxed()
            }),
            name,
        }
    }
}

impl<F, Fut, I, O> IntoAsyncStep<I, O> for F
where
    F: Fn(I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = O> + Send + 'static,
{
    fn into_async_step(self) -> AsyncStep<I, O> {
        AsyncStep::new(self)
    }
}
