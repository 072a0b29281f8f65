//! Three concurrent instrumented workloads feeding one collector.
//!
//! Run with `cargo run --example fan_in`; each worker logs one TIMING line
//! showing roughly its sleep length.

use std::time::Duration;

use probe::time_scope;
use timing::{Collector, CollectorHandle};

async fn work(handle: CollectorHandle, secs: u64) {
    time_scope!(&handle);
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let (collector, handle, shutdown) = Collector::new();
    let loop_task = collector.spawn();

    let workers: Vec<_> = [1u64, 2, 4]
        .into_iter()
        .map(|secs| tokio::spawn(work(handle.clone(), secs)))
        .collect();
    for worker in workers {
        worker.await.expect("worker panicked");
    }

    // All completions are in the channel; ask the loop to drain and exit.
    shutdown.terminate().expect("collector already stopped");
    let logged = loop_task.await.expect("collector task panicked");
    tracing::info!(logged, "collector finished");
}
