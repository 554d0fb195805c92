//! Periodic Cleanup Task
//!
//! Background task that proactively evicts between insertions once the cache
//! is above its occupancy high-water mark.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::tasks::SharedCache;

/// Spawns a background task that periodically runs the cleanup check.
///
/// Each tick acquires the write lock and calls `CacheManager::cleanup`, which
/// evicts only when entry count exceeds 80% of `max_entries`.
///
/// # Returns
/// A JoinHandle for the spawned task, used to abort it on teardown.
///
/// # Example
/// ```ignore
/// let cache = Arc::new(RwLock::new(CacheManager::new(CacheConfig::default())));
/// let cleanup_handle = spawn_cleanup_task(cache.clone(), 300_000);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_ms: u64) -> JoinHandle<()> {
    let interval = Duration::from_millis(cleanup_interval_ms.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache cleanup task with interval of {} ms",
            cleanup_interval_ms
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!("Cache cleanup: evicted {} entries, {} remaining", removed, remaining);
            } else {
                debug!("Cache cleanup: occupancy below threshold ({} entries)", remaining);
            }
        }
    })
}
