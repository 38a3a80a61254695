//! Handlers for the caller's own links.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::link::{DeletedResponse, LinkListResponse, LinkResponse};
use crate::domain::ownership::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/links/me` (bearer token required)
///
/// # Response
///
/// ```json
/// { "count": 1, "links": [ { "id": 1, "slug": "abc123", ... } ] }
/// ```
pub async fn my_links_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links: Vec<LinkResponse> = state
        .link_service
        .list_my_links(caller)
        .await?
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.slug);
            LinkResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(LinkListResponse {
        count: links.len(),
        links,
    }))
}

/// Permanently deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}` (bearer token required)
///
/// The slug can be reserved again as soon as this returns.
///
/// # Errors
///
/// - `404` if no link has this id (non-numeric ids included)
/// - `401` `forbidden` if the caller does not own the link
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::not_found("Link not found", json!({ "id": id })))?;

    state.link_service.delete_link(caller, id).await?;

    Ok(Json(DeletedResponse::default()))
}
