//! DTOs for link statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Link;

/// Click count and metadata for a single slug.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub slug: String,
    pub original_url: String,
    pub clicks: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for StatsResponse {
    fn from(link: Link) -> Self {
        Self {
            slug: link.slug,
            original_url: link.original_url,
            clicks: link.clicks,
            created_at: link.created_at,
        }
    }
}
