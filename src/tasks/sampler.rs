//! Metrics Sampler Task
//!
//! Periodically snapshots cache metrics, logs them, and publishes the latest
//! snapshot on a watch channel.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheMetrics;
use crate::tasks::SharedCache;

/// Spawns a task that samples metrics every `interval_ms`.
///
/// The returned receiver always holds the most recent sample (initially the
/// snapshot taken at spawn time).
pub fn spawn_metrics_sampler(
    cache: SharedCache,
    interval_ms: u64,
) -> (JoinHandle<()>, watch::Receiver<CacheMetrics>) {
    let interval = Duration::from_millis(interval_ms.max(1));
    let (tx, rx) = watch::channel(CacheMetrics::default());

    let handle = tokio::spawn(async move {
        debug!("Starting metrics sampler with interval of {} ms", interval_ms);

        loop {
            let metrics = cache.read().await.metrics();
            info!(
                entries = metrics.entry_count,
                size_bytes = metrics.cache_size,
                hit_rate = metrics.hit_rate,
                memory_usage = metrics.memory_usage,
                avg_access_ms = metrics.average_access_time,
                "cache metrics"
            );

            if tx.send(metrics).is_err() {
                debug!("Metrics sampler has no receivers, stopping");
                break;
            }
            tokio::time::sleep(interval).await;
        }
    });

    (handle, rx)
}
