//! Cache Manager Module
//!
//! Main cache engine: keyed storage with lazy TTL expiry, scored eviction,
//! dependency invalidation, and predictive preload hints.
//!
//! No public operation returns an error. Internal faults degrade to a miss,
//! an uncompressed payload, or a conservative size estimate.

use std::collections::HashMap;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::cache::codec::{self, Payload};
use crate::cache::entry::current_timestamp_ms;
use crate::cache::{
    eviction, preload, AccessHistory, CacheEntry, CacheMetrics, MetricsTracker, PreloadHint,
    SetOptions,
};
use crate::config::CacheConfig;

/// Occupancy ratio of `max_entries` above which cleanup evicts.
pub const CLEANUP_THRESHOLD: f64 = 0.8;

/// Buffered preload hints per subscriber before it starts lagging.
pub const PRELOAD_CHANNEL_CAPACITY: usize = 64;

// == Cache Manager ==
/// In-memory cache owning its store, access history, and metrics.
#[derive(Debug)]
pub struct CacheManager {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Recent access timestamps per key
    history: AccessHistory,
    /// Performance counters
    metrics: MetricsTracker,
    config: CacheConfig,
    /// Outbound preload hints
    preload_tx: broadcast::Sender<PreloadHint>,
}

impl CacheManager {
    // == Constructor ==
    /// Creates an empty cache with the given configuration.
    pub fn new(config: CacheConfig) -> Self {
        let (preload_tx, _) = broadcast::channel(PRELOAD_CHANNEL_CAPACITY);

        Self {
            entries: HashMap::new(),
            history: AccessHistory::new(),
            metrics: MetricsTracker::new(),
            config,
            preload_tx,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Set ==
    /// Stores `data` under `key`, replacing any existing entry.
    ///
    /// Evicts first if the insertion would exceed the entry or size limits.
    /// Payloads that cannot be serialized are not cached.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, data: &T, options: SetOptions) {
        let started = Instant::now();

        if key.is_empty() {
            warn!("ignoring cache set with empty key");
            return;
        }

        let value = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "payload is not serializable, skipping cache set");
                return;
            }
        };
        let size = codec::estimate_size(&value);

        let payload = if options.compress && self.config.compression_enabled {
            codec::compress(value)
        } else {
            Payload::Plain(value)
        };

        // The replaced entry must not count against the limits
        self.entries.remove(key);
        self.ensure_capacity(size);

        let ttl_ms = options.ttl.unwrap_or(self.config.default_ttl_ms);
        let entry = CacheEntry::new(
            payload,
            size,
            options.priority,
            options.dependencies.into_iter().collect(),
            ttl_ms,
        );
        let now = entry.timestamp;

        self.entries.insert(key.to_string(), entry);
        self.history.record(key, now);
        self.update_metrics();
        self.metrics.record_access_time(elapsed_ms(started));

        debug!(key, size, ttl_ms, "cache set");
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Returns `None` for absent or expired keys; expired entries are removed.
    /// A payload that does not deserialize into `T` is also reported as `None`.
    pub fn get<T: DeserializeOwned>(&mut self, key: &str) -> Option<T> {
        let started = Instant::now();
        let value = self.lookup(key);
        self.metrics.record_access_time(elapsed_ms(started));

        match serde_json::from_value(value?) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!(key, error = %e, "cached payload has an unexpected shape");
                None
            }
        }
    }

    fn lookup(&mut self, key: &str) -> Option<Value> {
        let now = current_timestamp_ms();

        let Some(entry) = self.entries.get_mut(key) else {
            self.metrics.record_miss();
            debug!(key, "cache miss");
            return None;
        };

        if entry.is_expired_at(now) {
            self.remove_entry(key);
            self.metrics.record_miss();
            self.update_metrics();
            debug!(key, "cache entry expired");
            return None;
        }

        entry.touch(now);
        let value = codec::decompress(&entry.data);

        self.metrics.record_hit();
        self.history.record(key, now);
        if self.config.preload_enabled {
            self.predictive_preload(key);
        }

        Some(value)
    }

    // == Delete ==
    /// Removes a single key. Returns true if it was present.
    pub fn delete(&mut self, key: &str) -> bool {
        let removed = self.remove_entry(key).is_some();
        if removed {
            self.update_metrics();
        }
        removed
    }

    // == Invalidate By Dependency ==
    /// Removes every entry tagged with `dependency`, returning how many.
    pub fn invalidate_by_dependency(&mut self, dependency: &str) -> usize {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.depends_on(dependency))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &keys {
            self.remove_entry(key);
        }
        self.update_metrics();

        if !keys.is_empty() {
            info!(dependency, count = keys.len(), "invalidated dependent entries");
        }
        keys.len()
    }

    // == Clear ==
    /// Drops every entry and its history, and resets metrics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.history.clear();
        self.metrics.reset();
        debug!("cache cleared");
    }

    // == Metrics ==
    /// Returns a metrics snapshot with occupancy computed from the live store.
    pub fn metrics(&self) -> CacheMetrics {
        let mut metrics = self.metrics.clone();
        metrics.set_occupancy(self.entries.len(), self.total_size());
        metrics.snapshot(self.config.max_size_bytes())
    }

    // == Introspection ==
    /// Returns the raw entry without touching access bookkeeping.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Returns all stored keys in sorted order, including not-yet-collected
    /// expired ones.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Subscribe ==
    /// Subscribes to preload hints emitted on cache hits.
    pub fn subscribe(&self) -> broadcast::Receiver<PreloadHint> {
        self.preload_tx.subscribe()
    }

    // == Evict ==
    /// Runs one scored eviction pass and returns the evicted keys.
    pub fn evict(&mut self) -> Vec<String> {
        let victims = eviction::select_victims(&self.entries, current_timestamp_ms());

        for key in &victims {
            self.remove_entry(key);
        }
        self.metrics.record_evictions(victims.len());
        self.update_metrics();

        if !victims.is_empty() {
            info!(
                count = victims.len(),
                remaining = self.entries.len(),
                "evicted lowest-scoring entries"
            );
        }
        victims
    }

    // == Cleanup ==
    /// Returns true once occupancy is above the cleanup high-water mark.
    pub fn needs_cleanup(&self) -> bool {
        self.entries.len() as f64 > self.config.max_entries as f64 * CLEANUP_THRESHOLD
    }

    /// Evicts if occupancy is above the high-water mark. Returns entries removed.
    pub fn cleanup(&mut self) -> usize {
        if self.needs_cleanup() {
            self.evict().len()
        } else {
            0
        }
    }

    // == Internal Helpers ==
    fn ensure_capacity(&mut self, incoming_size: u64) {
        let max_size = self.config.max_size_bytes();

        while !self.entries.is_empty()
            && (self.entries.len() + 1 > self.config.max_entries
                || self.total_size() + incoming_size > max_size)
        {
            self.evict();
        }
    }

    fn predictive_preload(&self, key: &str) {
        for predicted in preload::predict(key, &self.history, &self.entries) {
            debug!(key, predicted = %predicted, "emitting preload hint");
            // Hints are fire-and-forget; no subscribers is not an error
            let _ = self.preload_tx.send(PreloadHint { key: predicted });
        }
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        self.history.remove(key);
        self.entries.remove(key)
    }

    fn total_size(&self) -> u64 {
        self.entries.values().map(|entry| entry.size).sum()
    }

    fn update_metrics(&mut self) {
        let size = self.total_size();
        self.metrics.set_occupancy(self.entries.len(), size);
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
