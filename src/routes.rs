//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`       - Create a short link
//! - `GET  /stats/{code}`  - Link counters
//! - `GET  /health`        - Health check: storage, access queue
//! - `GET  /{code}`        - Short link redirect
//!
//! The literal segments `shorten`, `stats` and `health` are reserved and
//! can never be used as custom aliases.

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and the tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::routes())
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Wraps [`router`] so `/stats/abc/` and `/stats/abc` hit the same handler.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
