//! API Module
//!
//! HTTP handlers and routing for the cache REST API.
//!
//! # Endpoints
//! - `PUT /set` - Store a value
//! - `GET /get/:key` - Retrieve a value by key
//! - `DELETE /del/:key` - Delete a key
//! - `POST /invalidate/:dependency` - Invalidate by dependency tag
//! - `POST /clear` - Clear the cache
//! - `GET /metrics` - Metrics snapshot
//! - `GET /entry/:key` - Entry metadata
//! - `GET /keys` - List keys
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
