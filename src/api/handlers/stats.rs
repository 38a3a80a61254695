//! Handler for single-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click count for a slug.
///
/// # Endpoint
///
/// `GET /api/stats/{slug}`
///
/// Reading stats does not count as a click.
///
/// # Errors
///
/// Returns `404` if the slug is unknown.
pub async fn stats_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let link = state.link_service.get_stats(&slug).await?;

    Ok(Json(link.into()))
}
