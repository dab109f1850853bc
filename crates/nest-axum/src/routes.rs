//! Route definitions and router construction.
//!
//! This module defines the HTTP routes and creates the main router.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build all API routes without `/api` prefix (for nesting under /api).
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/convert", post(handlers::convert::convert))
        .route("/nest", post(handlers::convert::nest))
        .route("/render", post(handlers::convert::render))
        .route("/settings", get(handlers::settings::get))
}

/// Create the main Axum router.
///
/// API routes are nested under `/api`; request bodies above
/// `max_body_bytes` are rejected with 413.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig, max_body_bytes: usize) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest(
            "/api",
            api_routes()
                .with_state(state)
                .layer(DefaultBodyLimit::max(max_body_bytes))
                .layer(cors),
        )
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
