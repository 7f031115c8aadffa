//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /ping`       - Liveness probe
//! - `POST /shorten`    - Create or look up a short URL
//! - `GET  /s/{key}`    - Short URL redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{ping_handler, redirect_handler, shorten_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/ping", get(ping_handler))
        .route("/shorten", post(shorten_handler))
        .route("/s/{key}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
