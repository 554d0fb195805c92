//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use smart_cache::{api::create_router, AppState, CacheConfig, CacheManager};
use std::thread::sleep;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_app_with(CacheConfig::default())
}

fn create_app_with(config: CacheConfig) -> Router {
    create_router(AppState::new(CacheManager::new(config)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn set(app: &Router, body: Value) {
    let (status, _) = send(app, "PUT", "/set", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
}

// == SET / GET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let (status, json) = send(
        &app,
        "PUT",
        "/set",
        Some(json!({"key": "test_key", "value": {"sets": 3}})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();
    set(&app, json!({"key": "plan", "value": {"weeks": 8, "focus": "strength"}})).await;

    let (status, json) = send(&app, "GET", "/get/plan", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "plan");
    assert_eq!(json["value"], json!({"weeks": 8, "focus": "strength"}));
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/get/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].as_str().unwrap().contains("missing"));
}

#[tokio::test]
async fn test_compressed_round_trip_via_api() {
    let app = create_test_app();
    let value = json!({"exercises": ["squat", "bench"], "rest": 90});
    set(&app, json!({"key": "c", "value": value, "compress": true})).await;

    let (_, entry) = send(&app, "GET", "/entry/c", None).await;
    assert_eq!(entry["compressed"], true);

    let (status, json) = send(&app, "GET", "/get/c", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], value);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app();
    set(&app, json!({"key": "to_delete", "value": 1})).await;

    let (status, json) = send(&app, "DELETE", "/del/to_delete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"], "to_delete");

    let (status, _) = send(&app, "GET", "/get/to_delete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = send(&app, "DELETE", "/del/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

// == Invalidation / Clear Tests ==

#[tokio::test]
async fn test_invalidate_endpoint() {
    let app = create_test_app();
    set(&app, json!({"key": "dash", "value": 1, "dependencies": ["trainer:7"]})).await;
    set(&app, json!({"key": "roster", "value": 2, "dependencies": ["trainer:7", "team"]})).await;
    set(&app, json!({"key": "team_page", "value": 3, "dependencies": ["team"]})).await;

    let (status, json) = send(&app, "POST", "/invalidate/trainer:7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["removed"], 2);

    let (_, keys) = send(&app, "GET", "/keys", None).await;
    assert_eq!(keys["keys"], json!(["team_page"]));
    assert_eq!(keys["count"], 1);
}

#[tokio::test]
async fn test_clear_endpoint_resets_metrics() {
    let app = create_test_app();
    set(&app, json!({"key": "a", "value": 1})).await;
    send(&app, "GET", "/get/a", None).await;

    let (status, _) = send(&app, "POST", "/clear", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, metrics) = send(&app, "GET", "/metrics", None).await;
    assert_eq!(metrics["entry_count"], 0);
    assert_eq!(metrics["total_requests"], 0);
}

// == Metrics / Introspection Tests ==

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = create_test_app();
    set(&app, json!({"key": "k", "value": "v"})).await;
    send(&app, "GET", "/get/k", None).await;
    send(&app, "GET", "/get/k", None).await;
    send(&app, "GET", "/get/nope", None).await;

    let (status, json) = send(&app, "GET", "/metrics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_requests"], 3);
    assert_eq!(json["total_hits"], 2);
    assert_eq!(json["total_misses"], 1);
    assert_eq!(json["entry_count"], 1);
    let hit_rate = json["hit_rate"].as_f64().unwrap();
    let miss_rate = json["miss_rate"].as_f64().unwrap();
    assert!((hit_rate + miss_rate - 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_entry_endpoint() {
    let app = create_test_app();
    set(&app, json!({"key": "e", "value": 1, "priority": "high", "dependencies": ["x"]})).await;
    send(&app, "GET", "/get/e", None).await;

    let (status, json) = send(&app, "GET", "/entry/e", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["priority"], "high");
    assert_eq!(json["access_count"], 1);
    assert_eq!(json["dependencies"], json!(["x"]));
    assert_eq!(json["compressed"], false);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Handling Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/set")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_empty_key_request() {
    let app = create_test_app();

    let (status, json) = send(&app, "PUT", "/set", Some(json!({"key": "", "value": 1}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

// == Eviction / TTL Tests ==

#[tokio::test]
async fn test_low_priority_evicted_first_via_api() {
    let app = create_app_with(CacheConfig {
        max_entries: 3,
        ..CacheConfig::default()
    });
    set(&app, json!({"key": "summary", "value": 1, "priority": "high"})).await;
    set(&app, json!({"key": "banner", "value": 2, "priority": "low"})).await;
    set(&app, json!({"key": "profile", "value": 3})).await;
    set(&app, json!({"key": "schedule", "value": 4})).await;

    let (_, keys) = send(&app, "GET", "/keys", None).await;
    assert_eq!(keys["keys"], json!(["profile", "schedule", "summary"]));
}

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let app = create_test_app();
    set(&app, json!({"key": "short", "value": "v", "ttl": 50})).await;

    let (status, _) = send(&app, "GET", "/get/short", None).await;
    assert_eq!(status, StatusCode::OK);

    sleep(Duration::from_millis(120));

    let (status, _) = send(&app, "GET", "/get/short", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, keys) = send(&app, "GET", "/keys", None).await;
    assert_eq!(keys["count"], 0);
}
