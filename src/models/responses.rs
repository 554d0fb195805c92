//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::{CacheEntry, Priority};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for dependency invalidation (POST /invalidate/:dependency)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    pub dependency: String,
    /// Number of entries removed
    pub removed: usize,
}

/// Response body for POST /clear
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
}

impl ClearResponse {
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for GET /keys
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    pub count: usize,
    pub keys: Vec<String>,
}

impl KeysResponse {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Entry metadata for GET /entry/:key
///
/// Timestamps are rendered in RFC 3339.
#[derive(Debug, Clone, Serialize)]
pub struct EntryResponse {
    pub key: String,
    pub priority: Priority,
    /// Estimated size in bytes
    pub size: u64,
    pub access_count: u64,
    pub created_at: Option<String>,
    pub last_accessed: Option<String>,
    pub ttl_remaining_ms: u64,
    pub dependencies: Vec<String>,
    pub compressed: bool,
}

impl EntryResponse {
    pub fn from_entry(key: impl Into<String>, entry: &CacheEntry) -> Self {
        let mut dependencies: Vec<String> = entry.dependencies.iter().cloned().collect();
        dependencies.sort();

        Self {
            key: key.into(),
            priority: entry.priority,
            size: entry.size,
            access_count: entry.access_count,
            created_at: rfc3339(entry.timestamp),
            last_accessed: rfc3339(entry.last_accessed),
            ttl_remaining_ms: entry.ttl_remaining_ms(),
            dependencies,
            compressed: entry.data.is_compressed(),
        }
    }
}

fn rfc3339(timestamp_ms: u64) -> Option<String> {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(timestamp_ms as i64)
        .map(|dt| dt.to_rfc3339())
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Payload;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_get_response_serialize() {
        let resp = GetResponse::new("test_key", json!({"v": "test_value"}));
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("test_key"));
        assert!(json.contains("test_value"));
    }

    #[test]
    fn test_set_response_serialize() {
        let resp = SetResponse::new("my_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("my_key"));
        assert!(json.contains("successfully"));
    }

    #[test]
    fn test_delete_response_serialize() {
        let resp = DeleteResponse::new("deleted_key");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("deleted_key"));
        assert!(json.contains("deleted"));
    }

    #[test]
    fn test_keys_response_count() {
        let resp = KeysResponse::new(vec!["a".into(), "b".into()]);
        assert_eq!(resp.count, 2);
    }

    #[test]
    fn test_entry_response_from_entry() {
        let deps: HashSet<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        let entry = CacheEntry::new(Payload::Plain(json!(1)), 1, Priority::Low, deps, 60_000);

        let resp = EntryResponse::from_entry("k", &entry);
        assert_eq!(resp.priority, Priority::Low);
        assert_eq!(resp.dependencies, vec!["a", "b"]);
        assert!(!resp.compressed);
        assert!(resp.created_at.is_some());

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["priority"], "low");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
