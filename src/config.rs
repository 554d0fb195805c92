//! Configuration Module
//!
//! Handles loading cache and server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Cache manager configuration.
///
/// Supplied once at construction; the manager never reconfigures itself at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Maximum aggregate payload size in megabytes
    pub max_size_mb: u64,
    /// Maximum number of live entries
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries without an explicit TTL
    pub default_ttl_ms: u64,
    /// Periodic cleanup interval in milliseconds
    pub cleanup_interval_ms: u64,
    /// Whether `compress` requests on `set` are honored
    pub compression_enabled: bool,
    /// Whether hits run predictive preload analysis
    pub preload_enabled: bool,
}

impl CacheConfig {
    /// Maximum aggregate size in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb * 1024 * 1024
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size_mb: 50,
            max_entries: 1000,
            default_ttl_ms: 30 * 60 * 1000,
            cleanup_interval_ms: 5 * 60 * 1000,
            compression_enabled: true,
            preload_enabled: true,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache manager settings
    pub cache: CacheConfig,
    /// HTTP server port
    pub server_port: u16,
    /// Metrics sampling interval in milliseconds
    pub metrics_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_SIZE_MB` - Maximum aggregate cache size in MB (default: 50)
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 1800000)
    /// - `CLEANUP_INTERVAL_MS` - Cleanup frequency in milliseconds (default: 300000)
    /// - `COMPRESSION_ENABLED` - Honor per-entry compression (default: true)
    /// - `PRELOAD_ENABLED` - Emit predictive preload hints (default: true)
    /// - `METRICS_INTERVAL_MS` - Metrics sampling interval (default: 60000)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache: CacheConfig {
                max_size_mb: env_or("MAX_SIZE_MB", defaults.cache.max_size_mb),
                max_entries: env_or("MAX_ENTRIES", defaults.cache.max_entries),
                default_ttl_ms: env_or("DEFAULT_TTL_MS", defaults.cache.default_ttl_ms),
                cleanup_interval_ms: env_or(
                    "CLEANUP_INTERVAL_MS",
                    defaults.cache.cleanup_interval_ms,
                ),
                compression_enabled: env_or(
                    "COMPRESSION_ENABLED",
                    defaults.cache.compression_enabled,
                ),
                preload_enabled: env_or("PRELOAD_ENABLED", defaults.cache.preload_enabled),
            },
            server_port: env_or("SERVER_PORT", defaults.server_port),
            metrics_interval_ms: env_or("METRICS_INTERVAL_MS", defaults.metrics_interval_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
            metrics_interval_ms: 60_000,
        }
    }
}

/// Reads and parses an environment variable, falling back to `default`.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
