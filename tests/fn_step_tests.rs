use futures_util::stream::StreamExt;
use pipework::async_step::IntoAsyncStep;
use pipework::step::{compose, step};
use pipework::stream_step::IntoStreamStep;
use pipework::{wrap, IntoStep, PipeStream};
use tokio::runtime::Runtime;

fn add_scaled(x: i64, scale: i64, offset: i64) -> i64 {
    x * scale + offset
}

async fn delayed_add(x: i64, delta: i64) -> i64 {
    tokio::task::yield_now().await;
    x + delta
}

#[test]
fn test_bind_fixes_trailing_arguments_in_order() {
    let stage = wrap(add_scaled).bind(2).bind(5);

    // 10 * 2 + 5
    assert_eq!(stage.apply(10), 25);
}

#[test]
fn test_bind_returns_a_new_value_and_leaves_the_original_usable() {
    let base = wrap(add_scaled).bind(3);

    let no_offset = base.bind(0);
    let big_offset = base.bind(100);

    assert_eq!(no_offset.apply(1), 3);
    assert_eq!(big_offset.apply(1), 103);

    // The partially bound value is still usable afterwards
    assert_eq!(base.bind(7).apply(2), 13);
}

#[test]
fn test_one_wrapped_function_seeds_many_stages() {
    fn scale(x: i64, factor: i64) -> i64 {
        x * factor
    }

    let by_two = wrap(scale).bind(2);
    let by_ten = wrap(scale).bind(10);

    assert_eq!(by_two.apply(4), 8);
    assert_eq!(by_ten.apply(4), 40);
}

#[test]
fn test_fully_bound_function_converts_to_sync_step() {
    let stage = wrap(add_scaled).bind(2).bind(1).into_step();

    assert_eq!(stage.name(), "add_scaled");
    assert_eq!(stage.apply(3), 7);
}

#[test]
fn test_bound_step_composes_inside_sync_pipeline() {
    let pipeline = compose(wrap(add_scaled).bind(1).bind(3), step(|x: i64| x * 2));

    // (5 * 1 + 3) * 2
    assert_eq!(pipeline.apply(5), 16);
}

#[test]
fn test_fully_bound_async_function_converts_to_async_step() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let stage = wrap(delayed_add).bind(3).into_async_step();
        assert_eq!(stage.apply(5).await, 8);
    });
}

#[tokio::test]
async fn test_bound_async_step_composes_inside_async_pipeline() {
    let pipeline = pipework::async_step::compose(
        wrap(delayed_add).bind(2),
        |x: i64| async move { x * 10 },
    );

    assert_eq!(pipeline.apply(1).await, 30);
}

#[tokio::test]
async fn test_fully_bound_stream_function_converts_to_stream_step() {
    fn scale_all(
        input: PipeStream<i64>,
        factor: i64,
    ) -> impl futures_core::Stream<Item = i64> + Send {
        input.map(move |x| x * factor)
    }

    let stage = wrap(scale_all).bind(3).into_stream_step();
    let result: Vec<i64> = stage
        .apply(pipework::from_iter(vec![1, 2, 3]))
        .collect()
        .await;
    assert_eq!(result, vec![3, 6, 9]);
}

#[test]
fn test_pipeline_reduces_to_plain_callable_for_binding() {
    fn call_through<F: Fn(i64) -> i64>(x: i64, f: F) -> i64 {
        f(x)
    }

    // A whole pipeline is bound as an ordinary closure via into_fn
    let double_after_inc = compose(step(|x: i64| x + 1), step(|x: i64| x * 2));
    let stage = wrap(call_through).bind(double_after_inc.into_fn());

    assert_eq!(stage.apply(3), 8);
}

#[test]
fn test_bound_values_are_cloned_per_application() {
    fn tag(x: i64, label: String) -> String {
        format!("{}-{}", label, x)
    }

    let stage = wrap(tag).bind("item".to_string());

    assert_eq!(stage.apply(1), "item-1");
    assert_eq!(stage.apply(2), "item-2");
}

#[test]
fn test_zero_argument_wrap_behaves_like_step() {
    let stage = wrap(|x: i64| x - 1).into_step();
    assert_eq!(stage.apply(10), 9);
}
