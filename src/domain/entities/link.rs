//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use super::account::AccountId;

/// A shortened URL with its click counter and optional owner.
///
/// `owner_id` is `None` for links created anonymously. Such links can never
/// be deleted through the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub slug: String,
    pub original_url: String,
    pub clicks: u64,
    pub owner_id: Option<AccountId>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        slug: String,
        original_url: String,
        clicks: u64,
        owner_id: Option<AccountId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            slug,
            original_url,
            clicks,
            owner_id,
            created_at,
        }
    }

    /// Returns true if the link belongs to an account.
    pub fn is_owned(&self) -> bool {
        self.owner_id.is_some()
    }
}

/// Input data for reserving a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub slug: String,
    pub original_url: String,
    pub owner_id: Option<AccountId>,
}
