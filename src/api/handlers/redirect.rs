//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a slug to its original URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Behavior
///
/// - **Hit**: click counter incremented, `307 Temporary Redirect` to the target
/// - **Miss or malformed slug**: `307` to the configured fallback (the landing page)
///
/// Temporary redirects keep browsers coming back, so every visit is counted.
///
/// # Errors
///
/// Returns `500` only if storage fails.
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    match state.resolver.resolve(&slug).await? {
        Resolution::Found(link) => Ok(Redirect::temporary(&link.original_url)),
        Resolution::Fallback => Ok(Redirect::temporary(&state.fallback_url)),
    }
}
