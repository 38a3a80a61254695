//! Handlers for account registration, login and profile.

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::auth::{AuthResponse, LoginRequest, MeResponse, RegisterRequest};
use crate::domain::ownership::Caller;
use crate::error::AppError;
use crate::state::AppState;

/// Registers an account.
///
/// # Endpoint
///
/// `POST /api/register`
///
/// # Errors
///
/// - `400` for an invalid email or a password shorter than 6 characters
/// - `409` if the email is already registered
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let session = state
        .auth_service
        .register(&payload.email, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse::new(session.token, session.account)),
    ))
}

/// Logs in with email and password.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Errors
///
/// Returns `401` for unknown emails and wrong passwords alike.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let session = state
        .auth_service
        .login(&payload.email, payload.password)
        .await?;

    Ok(Json(AuthResponse::new(session.token, session.account)))
}

/// Returns the caller's account.
///
/// # Endpoint
///
/// `GET /api/me` (bearer token required)
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<MeResponse>, AppError> {
    let account = state.auth_service.me(caller).await?;

    Ok(Json(account.into()))
}
