use crate::ingest::Ingestor;
use crate::registry::MonitorRegistry;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

// Each pass dispatches every monitor as its own task and never waits on the
// results; a hung fetch cannot hold up other monitors or the next tick. The
// store's unique key absorbs any overlap between in-flight fetches.
pub async fn run(interval: Duration, registry: MonitorRegistry, ingestor: Ingestor) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        // The first tick completes immediately, so the first pass is not
        // delayed by the interval.
        ticker.tick().await;

        let monitors = registry.snapshot().await;
        tracing::debug!(monitors = monitors.len(), "starting polling pass");

        for monitor in monitors {
            let ingestor = ingestor.clone();
            tokio::spawn(async move {
                if let Err(err) = ingestor.ingest(&monitor).await {
                    tracing::warn!(
                        monitor = %monitor.name,
                        address = %monitor.address,
                        error = %err,
                        "failed to ingest reading"
                    );
                }
            });
        }
    }
}
