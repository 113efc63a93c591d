//! Synchronous scalar pipeline steps.
//!
//! A [`Step`] is a function from one value to another. Steps are linked with
//! [`compose`] (or [`Step::pipe`]) and evaluated with [`Step::apply`];
//! composition alone never runs anything.

use std::fmt;
use std::sync::Arc;

/// A Step represents a synchronous transformation from one type to another.
/// It's a function from I to O, erased behind an `Arc` so pipelines are
/// cheap to clone and safe to share between evaluations.
pub struct Step<I, O> {
    f: Arc<dyn Fn(I) -> O + Send + Sync + 'static>,
    name: Arc<str>,
}

impl<I, O> Clone for Step<I, O> {
    fn clone(&self) -> Self {
        Step {
            f: Arc::clone(&self.f),
            name: Arc::clone(&self.name),
        }
    }
}

impl<I, O> Step<I, O> {
    /// Create a new step from a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Step {
            f: Arc::new(f),
            name: short_type_name::<F>().into(),
        }
    }

    /// Apply this step to a value. This is the sole execution entry point:
    /// nothing runs until `apply` is called.
    pub fn apply(&self, input: I) -> O {
        (self.f)(input)
    }

    /// The step's label, as shown by `Debug`. Composed steps join their
    /// operands' labels with `" | "`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the step's label.
    pub fn named(mut self, name: impl Into<Arc<str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Link this step with another: the result applies `self`, then `next`.
    pub fn pipe<P, N>(self, next: N) -> Step<I, P>
    where
        N: IntoStep<O, P>,
        I: 'static,
        O: 'static,
        P: 'static,
    {
        compose(self, next)
    }

    /// Reduce this step to an ordinary closure, so a pipeline can be passed
    /// wherever a plain function is expected (a mapper argument, a bound
    /// argument of a [`crate::fn_step::FnStep`], ...).
    pub fn into_fn(self) -> impl Fn(I) -> O + Clone + Send + Sync + 'static
    where
        I: 'static,
        O: 'static,
    {
        move |input| (self.f)(input)
    }
}

impl<I, O> fmt::Debug for Step<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step({})", self.name)
    }
}

/// Wrap a plain function as a [`Step`]. Shorthand for [`Step::new`].
pub fn step<F, I, O>(f: F) -> Step<I, O>
where
    F: Fn(I) -> O + Send + Sync + 'static,
{
    Step::new(f)
}

/// The identity step: threads any value through unchanged.
pub fn identity<T>() -> Step<T, T> {
    Step::new(|input: T| input).named("identity")
}

/// Link two steps into one. Both operands may be steps, bound function
/// steps, or plain closures; a closure is accepted on the left as well,
/// which is the reverse-link form.
///
/// Linking is associative: `compose(compose(a, b), c)` and
/// `compose(a, compose(b, c))` are observationally identical.
///
/// # Examples
/// ```
/// use pipework::step;
///
/// let add_three = step(|x: i32| x + 3);
/// let double = step(|x: i32| x * 2);
/// let pipeline = pipework::step::compose(add_three, double);
/// assert_eq!(pipeline.apply(5), 16);
/// ```
pub fn compose<I, M, O>(left: impl IntoStep<I, M>, right: impl IntoStep<M, O>) -> Step<I, O>
where
    I: 'static,
    M: 'static,
    O: 'static,
{
    let left = left.into_step();
    let right = right.into_step();
    let name: Arc<str> = format!("{} | {}", left.name, right.name).into();
    let lf = left.f;
    let rf = right.f;
    Step {
        f: Arc::new(move |input: I| rf(lf(input))),
        name,
    }
}

/// Conversion into a [`Step`]: the sync variant's normalization rule.
///
/// Implemented by `Step` itself (identity — no re-wrapping), by plain
/// closures, and by fully bound [`crate::fn_step::FnStep`] values. Values
/// that are none of these do not implement the trait and are rejected at
/// compile time.
pub trait IntoStep<I, O> {
    fn into_step(self) -> Step<I, O>;
}

impl<I, O> IntoStep<I, O> for Step<I, O> {
    fn into_step(self) -> Step<I, O> {
        self
    }
}

impl<F, I, O> IntoStep<I, O> for F
where
    F: Fn(I) -> O + Send + Sync + 'static,
{
    fn into_step(self) -> Step<I, O> {
        Step::new(self)
    }
}

/// Trailing segment of a type path, so closure and fn-item labels stay
/// readable in pipeline representations.
pub(crate) fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
