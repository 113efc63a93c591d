use std::time::Duration;

use futures_util::stream::StreamExt;
use pipework::{channel, stream_ops};
use tokio::runtime::Runtime;
use tokio::time::sleep;

fn main() {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let (inlet, source) = channel::<u64>(16);

        // Feed the pipeline from a separate task; the stream ends when the
        // inlet is dropped
        let producer = tokio::spawn(async move {
            for i in 0..10 {
                inlet.send(i).await.expect("consumer is still running");
                sleep(Duration::from_millis(10)).await;
            }
        });

        let pipeline = pipework::stream_step::compose(
            stream_ops::map(|x: u64| async move { x * x }),
            stream_ops::filter(|x: u64| async move { x % 2 == 0 }),
        );

        let result = pipeline.apply(source).collect::<Vec<_>>().await;
        producer.await.unwrap();

        println!("even squares: {:?}", result); // Output: [0, 4, 16, 36, 64]
    });
}
