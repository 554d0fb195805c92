//! Cache Metrics Module
//!
//! Tracks process-wide hit/miss counters, occupancy, and access latency.

use serde::Serialize;

// == Cache Metrics ==
/// Read-only snapshot of cache performance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheMetrics {
    /// Percentage of requests that were hits
    pub hit_rate: f64,
    /// Percentage of requests that were misses
    pub miss_rate: f64,
    pub total_requests: u64,
    pub total_hits: u64,
    pub total_misses: u64,
    /// Aggregate estimated size of live entries in bytes
    pub cache_size: u64,
    pub entry_count: usize,
    /// Blended access latency in milliseconds
    pub average_access_time: f64,
    /// `cache_size` as a percentage of the configured maximum
    pub memory_usage: f64,
    /// Entries removed by the eviction policy
    pub evictions: u64,
}

// == Metrics Tracker ==
/// Accumulates counters between snapshots.
#[derive(Debug, Clone, Default)]
pub struct MetricsTracker {
    total_hits: u64,
    total_misses: u64,
    evictions: u64,
    average_access_time: f64,
    entry_count: usize,
    cache_size: u64,
}

impl MetricsTracker {
    // == Constructor ==
    /// Creates a new tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.total_hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.total_misses += 1;
    }

    // == Record Eviction ==
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }

    // == Record Access Time ==
    /// Blends a latency sample into the running average.
    ///
    /// This is `(avg + sample) / 2`, not a true moving average.
    pub fn record_access_time(&mut self, sample_ms: f64) {
        self.average_access_time = (self.average_access_time + sample_ms) / 2.0;
    }

    // == Update Occupancy ==
    pub fn set_occupancy(&mut self, entry_count: usize, cache_size: u64) {
        self.entry_count = entry_count;
        self.cache_size = cache_size;
    }

    pub fn total_requests(&self) -> u64 {
        self.total_hits + self.total_misses
    }

    /// Resets every counter to the zero state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // == Snapshot ==
    /// Builds a snapshot, deriving rates and memory usage on demand.
    pub fn snapshot(&self, max_size_bytes: u64) -> CacheMetrics {
        let total_requests = self.total_requests();
        let (hit_rate, miss_rate) = if total_requests == 0 {
            (0.0, 0.0)
        } else {
            let hit_rate = self.total_hits as f64 / total_requests as f64 * 100.0;
            (hit_rate, 100.0 - hit_rate)
        };
        let memory_usage = if max_size_bytes == 0 {
            0.0
        } else {
            self.cache_size as f64 / max_size_bytes as f64 * 100.0
        };

        CacheMetrics {
            hit_rate,
            miss_rate,
            total_requests,
            total_hits: self.total_hits,
            total_misses: self.total_misses,
            cache_size: self.cache_size,
            entry_count: self.entry_count,
            average_access_time: self.average_access_time,
            memory_usage,
            evictions: self.evictions,
        }
    }
}
