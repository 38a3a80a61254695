//! Account entity for registered users.

use chrono::{DateTime, Utc};

/// Stable identifier of an account, referenced by [`super::Link::owner_id`].
pub type AccountId = i64;

/// A registered user.
///
/// `password_hash` is an Argon2 PHC string and must never leave the service.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for registering an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
}

impl NewAccount {
    /// Builds a registration record, canonicalizing the email.
    pub fn new(email: &str, password_hash: String) -> Self {
        Self {
            email: normalize_email(email),
            password_hash,
        }
    }
}

/// Trims and lower-cases an email so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
