//! In-process implementation of the slug registry.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{AccountId, Link, NewLink};
use crate::domain::repositories::{LinkRepository, Reservation};
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    by_slug: HashMap<String, Link>,
    slug_by_id: HashMap<i64, String>,
}

/// Slug registry kept in memory behind a single lock.
///
/// Every mutation takes the write lock for its whole check-and-modify, which
/// gives the same atomicity as the database constraints. Contents are lost on
/// restart.
pub struct MemoryLinkRepository {
    inner: RwLock<Inner>,
    next_id: AtomicI64,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of links currently held.
    pub fn len(&self) -> usize {
        self.inner.read().by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn reserve(&self, new_link: NewLink) -> Result<Reservation, AppError> {
        let mut inner = self.inner.write();

        let link = match inner.by_slug.entry(new_link.slug) {
            Entry::Occupied(_) => return Ok(Reservation::Conflict),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let link = Link::new(
                    id,
                    slot.key().clone(),
                    new_link.original_url,
                    0,
                    new_link.owner_id,
                    Utc::now(),
                );
                slot.insert(link.clone());
                link
            }
        };

        inner.slug_by_id.insert(link.id, link.slug.clone());
        Ok(Reservation::Reserved(link))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        Ok(self.inner.read().by_slug.get(slug).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let inner = self.inner.read();
        Ok(inner
            .slug_by_id
            .get(&id)
            .and_then(|slug| inner.by_slug.get(slug))
            .cloned())
    }

    async fn increment_clicks(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let mut inner = self.inner.write();
        Ok(inner.by_slug.get_mut(slug).map(|link| {
            link.clicks += 1;
            link.clone()
        }))
    }

    async fn list_by_owner(&self, owner_id: AccountId) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .inner
            .read()
            .by_slug
            .values()
            .filter(|link| link.owner_id == Some(owner_id))
            .cloned()
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn delete(&self, link: &Link) -> Result<bool, AppError> {
        let mut inner = self.inner.write();

        let matches = inner
            .by_slug
            .get(&link.slug)
            .is_some_and(|stored| stored.id == link.id);
        if !matches {
            return Ok(false);
        }

        inner.by_slug.remove(&link.slug);
        inner.slug_by_id.remove(&link.id);
        Ok(true)
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_link(slug: &str, owner_id: Option<AccountId>) -> NewLink {
        NewLink {
            slug: slug.to_string(),
            original_url: "https://example.com".to_string(),
            owner_id,
        }
    }

    async fn reserve_ok(repo: &MemoryLinkRepository, slug: &str, owner: Option<AccountId>) -> Link {
        match repo.reserve(new_link(slug, owner)).await.unwrap() {
            Reservation::Reserved(link) => link,
            Reservation::Conflict => panic!("slug {slug} should be free"),
        }
    }

    #[tokio::test]
    async fn test_reserve_then_conflict() {
        let repo = MemoryLinkRepository::new();

        let link = reserve_ok(&repo, "abc123", None).await;
        assert_eq!(link.clicks, 0);

        let second = repo.reserve(new_link("abc123", Some(1))).await.unwrap();
        assert_eq!(second, Reservation::Conflict);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_slugs_are_case_sensitive() {
        let repo = MemoryLinkRepository::new();

        reserve_ok(&repo, "AbC", None).await;
        reserve_ok(&repo, "abc", None).await;

        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_increment_clicks() {
        let repo = MemoryLinkRepository::new();
        reserve_ok(&repo, "abc123", None).await;

        repo.increment_clicks("abc123").await.unwrap();
        let link = repo.increment_clicks("abc123").await.unwrap().unwrap();

        assert_eq!(link.clicks, 2);
        assert!(repo.increment_clicks("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_and_slug_agree() {
        let repo = MemoryLinkRepository::new();
        let link = reserve_ok(&repo, "abc123", Some(4)).await;

        let by_id = repo.find_by_id(link.id).await.unwrap().unwrap();
        let by_slug = repo.find_by_slug("abc123").await.unwrap().unwrap();

        assert_eq!(by_id, by_slug);
    }

    #[tokio::test]
    async fn test_delete_frees_slug() {
        let repo = MemoryLinkRepository::new();
        let link = reserve_ok(&repo, "abc123", Some(1)).await;

        assert!(repo.delete(&link).await.unwrap());
        assert!(repo.find_by_id(link.id).await.unwrap().is_none());
        assert!(repo.is_empty());

        let again = reserve_ok(&repo, "abc123", Some(2)).await;
        assert_ne!(again.id, link.id);
    }

    #[tokio::test]
    async fn test_delete_ignores_rebound_slug() {
        let repo = MemoryLinkRepository::new();
        let old = reserve_ok(&repo, "abc123", Some(1)).await;
        repo.delete(&old).await.unwrap();
        reserve_ok(&repo, "abc123", Some(2)).await;

        assert!(!repo.delete(&old).await.unwrap());
        assert!(repo.find_by_slug("abc123").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_by_owner_newest_first() {
        let repo = MemoryLinkRepository::new();
        let first = reserve_ok(&repo, "first1", Some(1)).await;
        let second = reserve_ok(&repo, "second", Some(1)).await;
        reserve_ok(&repo, "other1", Some(2)).await;
        reserve_ok(&repo, "anon01", None).await;

        let links = repo.list_by_owner(1).await.unwrap();

        let ids: Vec<i64> = links.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
