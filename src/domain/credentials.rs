//! Interfaces of the credential component.
//!
//! The link engine only needs two things from it: turning a bearer token into
//! an account id, and minting a token for an account after login. The JWT
//! implementation lives in [`crate::infrastructure::auth`].

use crate::domain::entities::AccountId;
use crate::error::AppError;

/// Verifies bearer tokens.
pub trait CredentialVerifier: Send + Sync {
    /// Returns the account id a valid token was issued for, `None` otherwise.
    fn verify(&self, token: &str) -> Option<AccountId>;
}

/// Issues bearer tokens.
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    fn issue(&self, account_id: AccountId) -> Result<String, AppError>;
}
