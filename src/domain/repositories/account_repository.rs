//! Repository trait for registered accounts.

use crate::domain::entities::{Account, AccountId, NewAccount};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for account storage.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryAccountRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Finds an account by its normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AppError>;

    /// Finds an account by id.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AppError>;
}
