#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use keel_core::validation::schema::SchemaRegistry;
use tower::ServiceExt;

use keel_api::config::ServerConfig;
use keel_api::router::build_app_router;
use keel_api::state::AppState;

/// Schema document used by the integration tests.
pub const TEST_SCHEMAS: &str = r#"{
    "users": {
        "name": [
            {"rule_type": "required"},
            {"rule_type": "min_length", "config": {"min": 4}},
            {"rule_type": "starts_with", "config": {"prefix": "foo"}}
        ],
        "email": [
            {"rule_type": "email", "message": "email must be valid"}
        ],
        "age": [
            {"rule_type": "type_check", "config": {"type": "integer"}},
            {"rule_type": "min_value", "config": {"min": 0}}
        ]
    },
    "tags": {
        "label": [{"rule_type": "required"}]
    }
}"#;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        schema_path: PathBuf::from("unused.json"),
    }
}

/// Build the full application router with all middleware layers, backed by
/// [`TEST_SCHEMAS`].
pub fn build_test_app() -> Router {
    let schemas = SchemaRegistry::from_json_str(TEST_SCHEMAS).expect("test schemas should load");
    let state = AppState {
        config: Arc::new(test_config()),
        schemas: Arc::new(schemas),
    };
    build_app_router(state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
