use std::time::Duration;

use futures_util::stream::StreamExt;
use pipework::{from_iter, stream_ops};
use tokio::runtime::Runtime;
use tokio::time::sleep;

async fn fetch(value: i64) -> i64 {
    // Stands in for a remote call
    sleep(Duration::from_millis(100)).await;
    value * 2
}

fn main() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let pipeline = stream_ops::map(fetch);

        let results = pipeline
            .apply(from_iter(vec![1, 2, 3, 4]))
            .collect::<Vec<_>>()
            .await;

        println!("{:?}", results); // Output: [2, 4, 6, 8]
    });
}
