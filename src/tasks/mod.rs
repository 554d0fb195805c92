//! Background Tasks Module
//!
//! Contains the cache's periodic drivers and the lifecycle handle that owns them.
//!
//! # Tasks
//! - Cleanup: evicts once occupancy passes the high-water mark
//! - Metrics sampler: logs and publishes metrics snapshots
//! - Preload listener: consumes preload hints

mod cleanup;
mod handle;
mod hints;
mod sampler;

pub use cleanup::spawn_cleanup_task;
pub use handle::{CacheHandle, SharedCache};
pub use hints::spawn_preload_listener;
pub use sampler::spawn_metrics_sampler;
