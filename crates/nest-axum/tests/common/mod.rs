//! Shared helpers for nest-axum integration tests.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use nest_core::ExportOptions;

use nest_axum::bootstrap::{CorsConfig, ServerConfig, bootstrap};
use nest_axum::routes::create_router;

/// Port recorded in test configs; router tests never bind it.
pub const TEST_PORT: u16 = 19797;

/// Body limit small enough to exercise the 413 path cheaply.
pub const TEST_BODY_LIMIT: usize = 4 * 1024;

pub const RECORDS: &str = r#"[
    {"country": "US", "city": "Boston", "currency": "USD", "amount": 100},
    {"country": "FR", "city": "Paris", "currency": "EUR", "amount": 20},
    {"country": "FR", "city": "Lyon", "currency": "EUR", "amount": 11.4}
]"#;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        port: TEST_PORT,
        max_body_bytes: TEST_BODY_LIMIT,
        export: ExportOptions::default(),
        cors: CorsConfig::AllowAll,
    }
}

pub fn app_with(config: &ServerConfig) -> Router {
    let ctx = bootstrap(config).expect("bootstrap test config");
    create_router(ctx, &config.cors, config.max_body_bytes)
}

pub fn app() -> Router {
    app_with(&test_config())
}

pub fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
