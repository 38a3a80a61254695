//! API route configuration.
//!
//! Routes are grouped by how much they need to know about the caller; the
//! matching [`crate::api::middleware::auth`] layer is attached in
//! [`crate::routes::router`].

use crate::api::handlers::{
    delete_link_handler, login_handler, me_handler, my_links_handler, qr_handler,
    register_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Routes open to everyone.
///
/// # Endpoints
///
/// - `GET  /stats/{slug}` - Click count for a link
/// - `GET  /qr/{slug}`    - QR code for a link's short URL
/// - `POST /register`     - Create an account
/// - `POST /login`        - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/stats/{slug}", get(stats_handler))
        .route("/qr/{slug}", get(qr_handler))
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Routes that behave differently for logged-in callers but accept anyone.
///
/// # Endpoints
///
/// - `POST /shorten` - Create a link; custom slugs need a token
pub fn caller_aware_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}

/// Routes that require a valid bearer token.
///
/// # Endpoints
///
/// - `GET    /links/me`   - The caller's links, newest first
/// - `DELETE /links/{id}` - Delete one of the caller's links
/// - `GET    /me`         - The caller's account
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links/me", get(my_links_handler))
        .route("/links/{id}", delete(delete_link_handler))
        .route("/me", get(me_handler))
}
