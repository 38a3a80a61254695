//! Slug registry: the single authority for slug uniqueness.

use crate::domain::entities::{AccountId, Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Outcome of [`LinkRepository::reserve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reservation {
    /// The slug was free and is now bound to the returned link.
    Reserved(Link),
    /// Another link already holds the slug. Nothing was written.
    Conflict,
}

/// Repository interface for the slug → link registry.
///
/// Every mutation is a single atomic storage operation; implementations must
/// never emulate `reserve` or `increment_clicks` with a read followed by a write.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Atomically inserts the link if no link holds its slug.
    ///
    /// Concurrent reservations of the same slug yield exactly one
    /// [`Reservation::Reserved`]; all others get [`Reservation::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn reserve(&self, new_link: NewLink) -> Result<Reservation, AppError>;

    /// Finds a link by slug without touching its click counter.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its storage id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Atomically increments the click counter and returns the updated link.
    ///
    /// Returns `Ok(None)` if no link holds the slug.
    async fn increment_clicks(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Lists links owned by an account, most recent first.
    async fn list_by_owner(&self, owner_id: AccountId) -> Result<Vec<Link>, AppError>;

    /// Permanently removes the link, freeing its slug.
    ///
    /// The record is matched on both slug and id, so a slug that was deleted
    /// and re-reserved in the meantime is left alone. Returns `Ok(false)` if
    /// nothing matched.
    async fn delete(&self, link: &Link) -> Result<bool, AppError>;

    /// Returns true if the backing store answers.
    async fn health_check(&self) -> bool;
}
