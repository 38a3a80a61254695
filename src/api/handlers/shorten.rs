//! Handler for link shortening endpoint.

use axum::{Extension, Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::domain::ownership::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten` (bearer token optional)
///
/// # Request Body
///
/// ```json
/// { "original_url": "example.com", "slug": "my-link" }
/// ```
///
/// `slug` is optional and requires a logged-in caller.
///
/// # Response
///
/// `201 Created`:
///
/// ```json
/// {
///   "id": 1,
///   "slug": "my-link",
///   "original_url": "https://example.com",
///   "short_url": "http://localhost:3000/my-link",
///   "clicks": 0,
///   "owner_id": 7,
///   "created_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400` `validation_error` for a missing/invalid URL or slug
/// - `400` `slug_taken` if the custom slug is in use
/// - `401` `auth_required` with `needsAuth: true` for an anonymous custom slug
pub async fn shorten_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;

    let link = state
        .link_service
        .create_link(caller, payload.original_url, payload.slug)
        .await?;

    let short_url = state.link_service.short_url(&link.slug);

    Ok((StatusCode::CREATED, Json(LinkResponse::new(link, short_url))))
}
