//! Bearer token authentication middleware.
//!
//! Both layers insert an [`Extension<Caller>`](axum::Extension) that handlers
//! read to learn who is calling.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::domain::ownership::Caller;
use crate::{error::AppError, state::AppState};

async fn bearer_token(parts: &mut Parts) -> Option<String> {
    AuthBearer::from_request_parts(parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token)
}

/// Requires a valid bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or the
/// token does not resolve to an existing account.
pub async fn require(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = bearer_token(&mut parts).await.ok_or_else(|| {
        AppError::unauthorized(
            "Not authorized to access this route",
            json!({ "reason": "Authorization header is missing or invalid" }),
        )
    })?;

    let caller = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}

/// Identifies the caller if a valid bearer token is present.
///
/// A missing or invalid token is not an error; the request continues as
/// [`Caller::Anonymous`].
pub async fn optional(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let caller = match bearer_token(&mut parts).await {
        Some(token) => match st.auth_service.authenticate(&token).await {
            Ok(caller) => caller,
            Err(AppError::Unauthorized { .. }) => Caller::Anonymous,
            Err(e) => return Err(e),
        },
        None => Caller::Anonymous,
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}
