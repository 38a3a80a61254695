//! DTOs for account endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Account, AccountId};

/// Shortest accepted password.
pub const MIN_PASSWORD_LENGTH: u64 = 6;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Please provide a valid email"))]
    pub email: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Please provide an email"))]
    pub email: String,

    #[validate(length(min = 1, message = "Please provide a password"))]
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub email: String,
}

/// Returned by register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub account: AccountSummary,
}

impl AuthResponse {
    pub fn new(token: String, account: Account) -> Self {
        Self {
            token,
            account: AccountSummary {
                id: account.id,
                email: account.email,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: AccountId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for MeResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            created_at: account.created_at,
        }
    }
}
