//! PostgreSQL implementation of the slug registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AccountId, Link, NewLink};
use crate::domain::repositories::{LinkRepository, Reservation};
use crate::error::AppError;

const LINK_COLUMNS: &str = "id, slug, original_url, clicks, owner_id, created_at";

#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    id: i64,
    slug: String,
    original_url: String,
    clicks: i64,
    owner_id: Option<AccountId>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.id,
            row.slug,
            row.original_url,
            u64::try_from(row.clicks).unwrap_or_default(),
            row.owner_id,
            row.created_at,
        )
    }
}

/// PostgreSQL repository for the slug registry.
///
/// Uniqueness rests on the `links_slug_key` constraint. `reserve` and
/// `increment_clicks` are single statements, so concurrent requests are
/// serialized by the database rather than by this process.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn reserve(&self, new_link: NewLink) -> Result<Reservation, AppError> {
        // ON CONFLICT DO NOTHING yields no row when the slug is already held.
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (slug, original_url, owner_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO NOTHING
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.slug)
        .bind(&new_link.original_url)
        .bind(new_link.owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(row) => Reservation::Reserved(row.into()),
            None => Reservation::Conflict,
        })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE slug = $1"
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn increment_clicks(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE slug = $1
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn list_by_owner(&self, owner_id: AccountId) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            SELECT {LINK_COLUMNS}
            FROM links
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, link: &Link) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND slug = $2")
            .bind(link.id)
            .bind(&link.slug)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> bool {
        match sqlx::query("SELECT 1").execute(self.pool.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database health check failed");
                false
            }
        }
    }
}
