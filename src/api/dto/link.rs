//! DTOs for link responses.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{AccountId, Link};

/// A link as returned by the API, with its full short URL.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub slug: String,
    pub original_url: String,
    pub short_url: String,
    pub clicks: u64,
    pub owner_id: Option<AccountId>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            slug: link.slug,
            original_url: link.original_url,
            short_url,
            clicks: link.clicks,
            owner_id: link.owner_id,
            created_at: link.created_at,
        }
    }
}

/// The caller's links, newest first.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub count: usize,
    pub links: Vec<LinkResponse>,
}

/// Empty body returned after a successful delete.
#[derive(Debug, Default, Serialize)]
pub struct DeletedResponse {}
