//! Cache Module
//!
//! Provides an in-memory cache with lazy TTL expiry, priority-aware scored
//! eviction, dependency invalidation, and predictive preload hints.

pub mod codec;
mod entry;
pub mod eviction;
mod history;
mod manager;
mod metrics;
pub mod preload;


// Re-export public types
pub use codec::{CompressedEnvelope, Payload};
pub use entry::{current_timestamp_ms, CacheEntry, Priority, SetOptions};
pub use history::{AccessHistory, HISTORY_CAPACITY};
pub use manager::{CacheManager, CLEANUP_THRESHOLD};
pub use metrics::{CacheMetrics, MetricsTracker};
pub use preload::PreloadHint;
