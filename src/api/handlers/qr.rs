//! Handler for QR codes of short URLs.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use crate::api::dto::qr::QrResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Renders a QR code for a slug's short URL.
///
/// # Endpoint
///
/// `GET /api/qr/{slug}`
///
/// # Errors
///
/// Returns `404` if the slug is unknown.
pub async fn qr_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<QrResponse>, AppError> {
    let link = state.link_service.get_stats(&slug).await?;
    let short_url = state.link_service.short_url(&link.slug);

    let qr_code = state
        .qr_renderer
        .render_data_url(&short_url)
        .map_err(|e| AppError::internal("Failed to render QR code", json!({ "reason": e.to_string() })))?;

    Ok(Json(QrResponse { qr_code, short_url }))
}
