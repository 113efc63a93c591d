use futures_util::stream::StreamExt;
use pipework::step::step;
use pipework::{from_iter, stream_ops, wrap};
use tokio::runtime::Runtime;

fn add(x: i64, amount: i64) -> i64 {
    x + amount
}

fn multiply(x: i64, factor: i64) -> i64 {
    x * factor
}

fn main() {
    // Sync pipelines need no runtime
    let pipeline = pipework::step::compose(wrap(add).bind(3), wrap(multiply).bind(2));
    println!("(5 + 3) * 2 = {}", pipeline.apply(5)); // Output: 16

    // The same stages, reused with different bindings
    let shifted = pipework::step::compose(wrap(add).bind(10), step(|x: i64| x - 1));
    println!("5 + 10 - 1 = {}", shifted.apply(5)); // Output: 14

    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        // Stream pipelines: map then filter, applied to a finite source
        let pipeline = pipework::stream_step::compose(
            stream_ops::map(|x: i64| async move { x + 1 }),
            stream_ops::filter(step(|x: i64| x % 2 == 0)),
        );

        let result = pipeline
            .apply(from_iter(vec![1, 2, 3, 4]))
            .collect::<Vec<_>>()
            .await;

        println!("Result: {:?}", result); // Output: Result: [2, 4]
    });
}
