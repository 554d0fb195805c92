//! Smart Cache - A predictive, priority-aware in-memory cache
//!
//! Provides TTL expiry, scored eviction, dependency invalidation, and
//! correlation-based preload hints, plus an HTTP surface for the cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheManager, Priority, SetOptions};
pub use config::{CacheConfig, Config};
pub use tasks::CacheHandle;
