//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{slug}`  - Short link redirect (public)
//! - `GET  /health`  - Storage health check (public)
//! - `/api/*`        - REST API, see [`crate::api::routes`]
//! - everything else - Landing page assets from the static directory
//!
//! Single-segment paths are slugs, so landing page assets live either at `/`
//! (`index.html`) or below a subdirectory such as `/assets/`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token, required or optional per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Builds every dynamic route with its middleware, without static files.
pub fn router(state: AppState) -> Router {
    let api_router = Router::new()
        .merge(
            api::routes::protected_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::require)),
        )
        .merge(
            api::routes::caller_aware_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth::optional)),
        )
        .merge(api::routes::public_routes());

    Router::new()
        .route("/health", get(health_handler))
        .route("/{slug}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application with static files and path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `static_dir` - directory holding the landing page (`index.html`)
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    let static_dir = static_dir.as_ref();

    let router = router(state)
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .fallback_service(ServeDir::new(static_dir));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
