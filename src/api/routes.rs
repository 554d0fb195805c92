//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, delete_handler, entry_handler, get_handler, health_handler,
    invalidate_handler, keys_handler, metrics_handler, set_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /set` - Store a value with cache options
/// - `GET /get/:key` - Retrieve a value by key
/// - `DELETE /del/:key` - Delete a key
/// - `POST /invalidate/:dependency` - Remove entries tagged with a dependency
/// - `POST /clear` - Drop all entries and reset metrics
/// - `GET /metrics` - Metrics snapshot
/// - `GET /entry/:key` - Entry metadata
/// - `GET /keys` - List keys
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", put(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/del/:key", delete(delete_handler))
        .route("/invalidate/:dependency", post(invalidate_handler))
        .route("/clear", post(clear_handler))
        .route("/metrics", get(metrics_handler))
        .route("/entry/:key", get(entry_handler))
        .route("/keys", get(keys_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
