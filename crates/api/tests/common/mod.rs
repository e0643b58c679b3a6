#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wishmap_api::config::ServerConfig;
use wishmap_api::router::build_app_router;
use wishmap_api::state::AppState;
use wishmap_db::repositories::sqlite_destination_repo::IN_MEMORY;
use wishmap_db::StorageConfig;
use wishmap_geocode::GeocodeClient;

/// Nothing listens here, so geocoder calls fail fast with a connection error.
pub const UNREACHABLE_GEOCODER: &str = "http://127.0.0.1:1";

/// Build a test `ServerConfig` with safe defaults and an in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        geocoder_url: UNREACHABLE_GEOCODER.to_string(),
        static_dir: None,
        storage: StorageConfig::Local {
            path: IN_MEMORY.to_string(),
        },
    }
}

/// Build the full application router over a fresh in-memory database.
///
/// Uses the same `build_app_router` as `main.rs`, so integration tests
/// exercise the production middleware stack. The returned router is cheap
/// to clone; every clone shares the same database.
pub async fn build_test_app() -> Router {
    build_test_app_with(test_config()).await
}

pub async fn build_test_app_with(config: ServerConfig) -> Router {
    let store = wishmap_db::open_store(&config.storage).await.unwrap();
    let geocoder = GeocodeClient::new(config.geocoder_url.clone()).unwrap();

    let state = AppState {
        store,
        geocoder: Arc::new(geocoder),
    };

    build_app_router(state, &config).unwrap()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: &Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PUT, uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PATCH, uri, body).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a destination and return its id.
pub async fn create(app: &Router, body: serde_json::Value) -> i64 {
    let response = post_json(app, "/api/v1/destinations", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
