//! pipework - a composable pipeline DSL
//!
//! Pipelines are built from steps. A step is a transformation wrapped so it
//! can be linked with other steps; linking is pure data construction, and
//! nothing runs until the finished pipeline is applied to an input. Three
//! variants share the same algebra:
//!
//! - [`Step<I, O>`](step::Step): a synchronous value transformation,
//! - [`AsyncStep<I, O>`](async_step::AsyncStep): a transformation that
//!   resolves asynchronously,
//! - [`StreamStep<I, O>`](stream_step::StreamStep): a whole-stream
//!   transformation over the canonical [`PipeStream`] shape.
//!
//! Weaker variants lift into stronger ones when linked: a sync step slots
//! into an async chain, and both scalar kinds slot into a stream pipeline
//! as element-wise stages.
//!
//! # Examples
//!
//! Sync pipelines evaluate directly:
//!
//! ```
//! use pipework::{step, wrap};
//!
//! fn add(x: i64, amount: i64) -> i64 {
//!     x + amount
//! }
//!
//! let pipeline = pipework::step::compose(wrap(add).bind(3), step(|x: i64| x * 2));
//! assert_eq!(pipeline.apply(5), 16);
//! ```
//!
//! Stream pipelines mix sync and async stages freely:
//!
//! ```
//! use futures_util::stream::StreamExt;
//! use pipework::{from_iter, step, stream_ops};
//!
//! # async fn example() {
//! let pipeline = pipework::stream_step::compose(
//!     stream_ops::map(|x: i32| async move { x + 1 }),
//!     stream_ops::filter(step(|x: i32| x % 2 == 0)),
//! );
//!
//! let result = pipeline.apply(from_iter(vec![1, 2, 3, 4])).collect::<Vec<_>>().await;
//! assert_eq!(result, vec![2, 4]);
//! # }
//! ```
//!
//! Values that are neither steps nor callables cannot enter a pipeline;
//! there is no runtime probing, so the rejection happens at compile time:
//!
//! ```compile_fail
//! // a bare number is not a step and not callable
//! let stage = pipework::stream_ops::map(42i32);
//! ```

pub mod async_step;
pub mod fn_step;
pub mod iter_ops;
pub mod source;
pub mod step;
pub mod stream_ops;
pub mod stream_step;

// Re-export the step types and constructors at the crate root. The
// per-variant `compose` and `identity` free functions share names, so those
// stay behind their module paths.
pub use async_step::{async_step, AsyncStep, IntoAsyncStep};
pub use fn_step::{wrap, Append, FnStep, StepFn};
pub use source::{channel, emit, empty, eval, eval_iter, from_iter, ChannelError, ChannelResult, Inlet};
pub use step::{step, IntoStep, Step};
pub use stream_step::{stream_step, IntoStreamStep, PipeStream, StreamStep};
