//! Cache Lifecycle Handle
//!
//! Binds a cache manager to its background tasks: construct with `start`,
//! tear down with `destroy`.

use std::sync::Arc;

use tokio::sync::{broadcast, watch, RwLock};
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{CacheManager, CacheMetrics, PreloadHint};
use crate::config::CacheConfig;
use crate::tasks::{spawn_cleanup_task, spawn_metrics_sampler};

/// Shared, lock-protected cache manager.
pub type SharedCache = Arc<RwLock<CacheManager>>;

// == Cache Handle ==
/// Owns a shared cache and the tasks driving it.
///
/// Must be created inside a tokio runtime. Dropping the handle aborts its
/// tasks; `destroy` additionally clears the store.
#[derive(Debug)]
pub struct CacheHandle {
    cache: SharedCache,
    cleanup: JoinHandle<()>,
    sampler: Option<(JoinHandle<()>, watch::Receiver<CacheMetrics>)>,
}

impl CacheHandle {
    /// Creates the cache and starts its periodic cleanup driver.
    pub fn start(config: CacheConfig) -> Self {
        let interval_ms = config.cleanup_interval_ms;
        let cache = Arc::new(RwLock::new(CacheManager::new(config)));
        let cleanup = spawn_cleanup_task(cache.clone(), interval_ms);

        info!("Cache started with cleanup every {} ms", interval_ms);
        Self {
            cache,
            cleanup,
            sampler: None,
        }
    }

    /// Adds periodic metrics sampling, replacing any existing sampler.
    pub fn with_metrics_sampling(mut self, interval_ms: u64) -> Self {
        if let Some((previous, _)) = self.sampler.take() {
            previous.abort();
        }
        self.sampler = Some(spawn_metrics_sampler(self.cache.clone(), interval_ms));
        self
    }

    pub fn cache(&self) -> SharedCache {
        self.cache.clone()
    }

    /// Subscribes to preload hints.
    pub async fn subscribe(&self) -> broadcast::Receiver<PreloadHint> {
        self.cache.read().await.subscribe()
    }

    /// Most recent sampled metrics, if sampling is enabled.
    pub fn sampled_metrics(&self) -> Option<CacheMetrics> {
        self.sampler.as_ref().map(|(_, rx)| rx.borrow().clone())
    }

    // == Destroy ==
    /// Stops the periodic tasks and clears the store.
    pub async fn destroy(self) {
        self.abort_tasks();
        self.cache.write().await.clear();
        info!("Cache destroyed");
    }

    fn abort_tasks(&self) {
        self.cleanup.abort();
        if let Some((sampler, _)) = &self.sampler {
            sampler.abort();
        }
    }
}

impl Drop for CacheHandle {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}
