//! Application error type and its HTTP representation.
//!
//! Every failure the service can report is an [`AppError`]. Handlers return
//! `Result<_, AppError>` and axum turns the error into a structured JSON body:
//!
//! ```json
//! { "error": { "code": "slug_taken", "message": "Slug is already taken", "details": {} } }
//! ```
//!
//! [`AppError::AuthRequired`] additionally carries a top-level `"needsAuth": true`
//! so clients can prompt for login instead of showing a hard error.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
    #[serde(rename = "needsAuth", skip_serializing_if = "std::ops::Not::not")]
    needs_auth: bool,
}

/// Serializable error payload.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed URL, slug charset, or request body.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// A custom slug collided with an existing link.
    #[error("{message}")]
    SlugTaken { message: String, details: Value },

    /// The operation needs a logged-in caller.
    #[error("{message}")]
    AuthRequired { message: String, details: Value },

    /// Missing, malformed, or expired credentials.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Authenticated, but not the owner.
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Duplicate unique value other than a slug (account email).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn slug_taken(message: impl Into<String>, details: Value) -> Self {
        Self::SlugTaken {
            message: message.into(),
            details,
        }
    }

    pub fn auth_required(message: impl Into<String>, details: Value) -> Self {
        Self::AuthRequired {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable error code used in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::SlugTaken { .. } => "slug_taken",
            AppError::AuthRequired { .. } => "auth_required",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Forbidden { .. } => "forbidden",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// HTTP status for this error.
    ///
    /// Ownership mismatches answer `401` rather than `403`; the public API
    /// has always reported "not the owner" that way.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::SlugTaken { .. } => StatusCode::BAD_REQUEST,
            AppError::AuthRequired { .. }
            | AppError::Unauthorized { .. }
            | AppError::Forbidden { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::SlugTaken { message, details }
            | AppError::AuthRequired { message, details }
            | AppError::Unauthorized { message, details }
            | AppError::Forbidden { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let needs_auth = matches!(self, AppError::AuthRequired { .. });

        if let AppError::Internal { message, details } = &self {
            tracing::error!(%message, %details, "Request failed with internal error");
        }

        let mut error = self.to_error_info();
        if matches!(self, AppError::Internal { .. }) {
            error.details = json!({});
        }

        (status, Json(ErrorBody { error, needs_auth })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        AppError::bad_request("Invalid request", json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::bad_request("Invalid JSON body", json!({ "reason": e.body_text() }))
    }
}
