use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_stream::stream;
use futures_util::stream::StreamExt;
use pipework::async_step::async_step;
use pipework::step::step;
use pipework::stream_step::{compose, identity, stream_step, IntoStreamStep, StreamStep};
use pipework::{from_iter, stream_ops, PipeStream};
use quickcheck::TestResult;
use tokio::runtime::Runtime;

async fn async_double(x: i64) -> i64 {
    tokio::task::yield_now().await;
    x * 2
}

#[test]
fn test_stream_pipeline_map_then_filter() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let pipeline = compose(
            stream_ops::map(|x: i64| async move { x + 1 }),
            stream_ops::filter(|x: i64| async move { x % 2 == 0 }),
        );

        let result: Vec<i64> = pipeline.apply(from_iter(vec![1, 2, 3, 4])).collect().await;
        assert_eq!(result, vec![2, 4]);
    });
}

#[tokio::test]
async fn test_sync_predicate_lifts_into_stream_filter() {
    // No explicit conversion: the sync step is lifted where a predicate
    // stage is expected
    let is_positive = step(|x: i64| x > 0);
    let pipeline = stream_ops::filter(is_positive);

    let result: Vec<i64> = pipeline.apply(from_iter(vec![-2, -1, 0, 1])).collect().await;
    assert_eq!(result, vec![1]);
}

#[tokio::test]
async fn test_scalar_step_lift_preserves_order() {
    let square = step(|x: i64| x * x);

    let stage = square.into_stream_step();
    let result: Vec<i64> = stage.apply(from_iter(vec![1, 2, 3])).collect().await;
    assert_eq!(result, vec![1, 4, 9]);
}

#[tokio::test]
async fn test_async_scalar_lift_preserves_order() {
    let pipeline = compose(identity::<i64>(), async_step(async_double));

    let result: Vec<i64> = pipeline.apply(from_iter(vec![1, 2, 3])).collect().await;
    assert_eq!(result, vec![2, 4, 6]);
}

#[tokio::test]
async fn test_whole_stream_closure_wraps_directly() {
    let evens_doubled = stream_step(|input: PipeStream<i64>| {
        input.filter(|x| futures::future::ready(x % 2 == 0)).map(|x| x * 2)
    });

    let result: Vec<i64> = evens_doubled.apply(from_iter(1..=6)).collect().await;
    assert_eq!(result, vec![4, 8, 12]);
}

#[tokio::test]
async fn test_from_async_builds_stage_from_future_of_stream() {
    let stage = StreamStep::from_async(|input: PipeStream<i64>| async move {
        tokio::task::yield_now().await;
        input.map(|x| x * 2)
    });

    let result: Vec<i64> = stage.apply(from_iter(vec![1, 2, 3])).collect().await;
    assert_eq!(result, vec![2, 4, 6]);
}

#[tokio::test]
async fn test_from_sink_reduces_the_whole_stream_to_one_element() {
    let pipeline = compose(
        stream_ops::map(|x: i64| async move { x * 2 }),
        StreamStep::from_sink(|input: PipeStream<i64>| async move {
            input.fold(0, |acc, x| async move { acc + x }).await
        }),
    );

    // 0..4 doubled sums to 12, emitted as a single element
    let result: Vec<i64> = pipeline.apply(from_iter(0..4)).collect().await;
    assert_eq!(result, vec![12]);
}

#[tokio::test]
async fn test_from_async_iter_expands_the_returned_collection() {
    let duplicate = StreamStep::from_async_iter(|input: PipeStream<i64>| async move {
        let values: Vec<i64> = input.collect().await;
        let mut out = values.clone();
        out.extend(values);
        out
    });

    let result: Vec<i64> = duplicate.apply(from_iter(vec![1, 2])).collect().await;
    assert_eq!(result, vec![1, 2, 1, 2]);
}

#[tokio::test]
async fn test_pipeline_reapplies_to_fresh_sources() {
    let pipeline = compose(
        stream_ops::map(|x: i64| async move { x + 1 }),
        stream_ops::filter(step(|x: i64| x % 2 == 0)),
    );

    let first: Vec<i64> = pipeline.apply(from_iter(vec![1, 2, 3, 4])).collect().await;
    let second: Vec<i64> = pipeline.apply(from_iter(vec![5, 6, 7])).collect().await;

    assert_eq!(first, vec![2, 4]);
    assert_eq!(second, vec![6, 8]);
}

#[tokio::test]
async fn test_stages_pull_one_element_at_a_time() {
    let produced = Arc::new(AtomicUsize::new(0));
    let source = {
        let produced = produced.clone();
        stream! {
            for i in 0i64.. {
                produced.fetch_add(1, Ordering::SeqCst);
                yield i;
            }
        }
    };

    let stage = stream_ops::map(|x: i64| async move { x * 2 });
    let mut out = stage.apply(source);

    assert_eq!(out.next().await, Some(0));
    assert_eq!(out.next().await, Some(2));

    // Nothing was prefetched beyond the two pulled elements
    assert_eq!(produced.load(Ordering::SeqCst), 2);

    // Dropping the stream stops all further production
    drop(out);
    assert_eq!(produced.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_take_ends_an_infinite_pipeline() {
    let pipeline = compose(
        stream_ops::map(|x: u64| async move { x * x }),
        stream_ops::take(4),
    );

    let result: Vec<u64> = pipeline.apply(from_iter(0u64..)).collect().await;
    assert_eq!(result, vec![0, 1, 4, 9]);
}

#[tokio::test]
async fn test_debug_representation_joins_stage_labels() {
    let pipeline = compose(
        stream_ops::map(|x: i64| async move { x + 1 }),
        stream_ops::take(2),
    );

    assert!(pipeline.name().contains("map"));
    assert!(pipeline.name().contains("take(2)"));
    assert!(pipeline.name().contains(" | "));
}

// Property-based test: stream composition is associative for any source
#[tokio::test]
async fn property_based_stream_composition_associativity() {
    async fn associativity_holds(input: Vec<i64>) -> TestResult {
        if input.len() > 1000 {
            return TestResult::discard();
        }

        let a = stream_ops::map(|x: i64| async move { x.wrapping_add(1) });
        let b = stream_ops::filter(|x: i64| async move { x % 2 == 0 });
        let c = stream_ops::map(|x: i64| async move { x.wrapping_mul(3) });

        let left_grouped = compose(compose(a.clone(), b.clone()), c.clone());
        let right_grouped = compose(a, compose(b, c));

        let left: Vec<i64> = left_grouped.apply(from_iter(input.clone())).collect().await;
        let right: Vec<i64> = right_grouped.apply(from_iter(input)).collect().await;

        TestResult::from_bool(left == right)
    }

    for size in [0, 1, 10, 100] {
        let input: Vec<i64> = (0..size).collect();
        let result = associativity_holds(input).await;
        assert!(!result.is_failure(), "associativity failed for size {}", size);
    }
}
