//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::cache::{CacheManager, CacheMetrics};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    ClearResponse, DeleteResponse, EntryResponse, GetResponse, HealthResponse, InvalidateResponse,
    KeysResponse, SetRequest, SetResponse,
};
use crate::tasks::SharedCache;

/// Application state shared across all handlers.
///
/// Contains the cache manager wrapped in Arc<RwLock<>> for thread-safe access.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache manager
    pub cache: SharedCache,
}

impl AppState {
    /// Creates a new AppState with the given cache manager.
    pub fn new(cache: CacheManager) -> Self {
        Self::from_shared(Arc::new(RwLock::new(cache)))
    }

    /// Creates a new AppState around an already shared cache.
    pub fn from_shared(cache: SharedCache) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from cache configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(CacheManager::new(config.clone()))
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value with optional TTL, priority, dependencies, and compression.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let (key, value, options) = req.into_parts();
    let mut cache = state.cache.write().await;
    cache.set(&key, &value, options);

    Ok(Json(SetResponse::new(key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    // Write lock: reads update access bookkeeping and metrics
    let mut cache = state.cache.write().await;
    let value: Value = cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for POST /invalidate/:dependency
///
/// Removes every entry tagged with the dependency. Unknown tags remove nothing.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(dependency): Path<String>,
) -> Json<InvalidateResponse> {
    let removed = state
        .cache
        .write()
        .await
        .invalidate_by_dependency(&dependency);

    Json(InvalidateResponse {
        dependency,
        removed,
    })
}

/// Handler for POST /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    state.cache.write().await.clear();
    Json(ClearResponse::cleared())
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    let cache = state.cache.read().await;
    Json(cache.metrics())
}

/// Handler for GET /entry/:key
///
/// Returns entry metadata without counting as an access.
pub async fn entry_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<EntryResponse>> {
    let cache = state.cache.read().await;
    let entry = cache
        .entry(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(EntryResponse::from_entry(key, entry)))
}

/// Handler for GET /keys
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.read().await;
    Json(KeysResponse::new(cache.keys()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
