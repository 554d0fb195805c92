//! Cache Entry Module
//!
//! Defines individual cache entries, their priority, and per-`set` options.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::cache::codec::Payload;

// == Priority ==
/// Eviction priority of an entry, fixed at insertion.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Score contribution used by the eviction policy.
    pub fn weight(self) -> f64 {
        match self {
            Priority::High => 100.0,
            Priority::Medium => 50.0,
            Priority::Low => 25.0,
        }
    }
}

// == Set Options ==
/// Options accepted by `CacheManager::set`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SetOptions {
    /// Per-entry TTL in milliseconds; `None` uses the configured default
    pub ttl: Option<u64>,
    pub priority: Priority,
    /// Dependency tags for bulk invalidation
    pub dependencies: Vec<String>,
    /// Request the compression envelope (ignored when disabled in config)
    pub compress: bool,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl_ms: u64) -> Self {
        self.ttl = Some(ttl_ms);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}

// == Cache Entry ==
/// A single cached payload plus its bookkeeping metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload, possibly wrapped in the compression envelope
    pub data: Payload,
    /// Creation timestamp (Unix milliseconds), never refreshed on access
    pub timestamp: u64,
    /// Number of successful `get` calls
    pub access_count: u64,
    /// Last successful `get` (Unix milliseconds)
    pub last_accessed: u64,
    pub priority: Priority,
    /// Estimated serialized size in bytes
    pub size: u64,
    pub dependencies: HashSet<String>,
    /// Effective time-to-live in milliseconds
    pub ttl_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(
        data: Payload,
        size: u64,
        priority: Priority,
        dependencies: HashSet<String>,
        ttl_ms: u64,
    ) -> Self {
        let now = current_timestamp_ms();

        Self {
            data,
            timestamp: now,
            access_count: 0,
            last_accessed: now,
            priority,
            size,
            dependencies,
            ttl_ms,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its TTL at `now`.
    ///
    /// An entry whose age equals its TTL exactly is still live.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now.saturating_sub(self.timestamp) > self.ttl_ms
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Records a successful read at `now`.
    pub fn touch(&mut self, now: u64) {
        self.access_count += 1;
        self.last_accessed = now;
    }

    /// Returns true if the entry carries the given dependency tag.
    pub fn depends_on(&self, dependency: &str) -> bool {
        self.dependencies.contains(dependency)
    }

    /// Remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self) -> u64 {
        let age = current_timestamp_ms().saturating_sub(self.timestamp);
        self.ttl_ms.saturating_sub(age)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
