//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::{Priority, SetOptions};

/// Maximum accepted key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional TTL in milliseconds (uses the configured default if absent)
/// - `priority`: `low`, `medium` (default) or `high`
/// - `dependencies`: Tags for bulk invalidation
/// - `compress`: Store the payload in the compression envelope
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<u64>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub compress: bool,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} characters",
                MAX_KEY_LENGTH
            ));
        }
        if self.dependencies.iter().any(String::is_empty) {
            return Some("Dependency tags cannot be empty".to_string());
        }
        None
    }

    /// Splits the request into key, value, and cache options.
    pub fn into_parts(self) -> (String, Value, SetOptions) {
        let options = SetOptions {
            ttl: self.ttl,
            priority: self.priority,
            dependencies: self.dependencies,
            compress: self.compress,
        };
        (self.key, self.value, options)
    }
}
