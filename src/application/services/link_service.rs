//! Link creation, listing, statistics and deletion.

use std::sync::Arc;

use crate::domain::entities::{AccountId, Link, NewLink};
use crate::domain::ownership::{Caller, can_create_custom_slug, can_delete};
use crate::domain::repositories::{LinkRepository, Reservation};
use crate::error::AppError;
use crate::utils::slug_generator::{SlugGenerator, is_reserved_slug, validate_custom_slug};
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;

/// Upper bound on random slug attempts before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Service for creating and managing shortened links.
///
/// Decides between the random and custom slug paths and delegates all
/// uniqueness decisions to the registry's atomic `reserve`.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: Arc<dyn SlugGenerator>,
    slug_length: usize,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `repository` - the slug registry
    /// - `generator` - source of random slug candidates
    /// - `slug_length` - length of random slugs
    /// - `base_url` - public origin used to build short URLs
    pub fn new(
        repository: Arc<L>,
        generator: Arc<dyn SlugGenerator>,
        slug_length: usize,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            generator,
            slug_length,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Creates a short link.
    ///
    /// # Validation Order
    ///
    /// 1. `original_url` must be present
    /// 2. A missing `http(s)://` prefix becomes `https://`
    /// 3. The normalized URL must be well-formed
    /// 4. A custom slug requires an authenticated caller, a valid charset,
    ///    and a free slug
    /// 5. Otherwise a random slug is generated with bounded retries
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a missing/malformed URL or bad slug
    /// - [`AppError::AuthRequired`] for a custom slug from an anonymous caller
    /// - [`AppError::SlugTaken`] if the custom slug is in use
    /// - [`AppError::Internal`] if random generation keeps colliding
    pub async fn create_link(
        &self,
        caller: Caller,
        original_url: Option<String>,
        custom_slug: Option<String>,
    ) -> Result<Link, AppError> {
        let raw_url = original_url.ok_or_else(|| {
            AppError::bad_request("Please provide a URL", json!({ "field": "original_url" }))
        })?;

        let original_url = normalize_url(&raw_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "original_url": raw_url }))
        })?;

        let owner_id = caller.account_id();

        match custom_slug {
            Some(slug) => self.create_custom(&caller, slug, original_url).await,
            None => self.create_random(original_url, owner_id).await,
        }
    }

    async fn create_custom(
        &self,
        caller: &Caller,
        slug: String,
        original_url: String,
    ) -> Result<Link, AppError> {
        if !can_create_custom_slug(caller) {
            return Err(AppError::auth_required(
                "You need to be logged in to use custom slugs",
                json!({ "slug": slug }),
            ));
        }

        validate_custom_slug(&slug)?;

        let new_link = NewLink {
            slug: slug.clone(),
            original_url,
            owner_id: caller.account_id(),
        };

        match self.repository.reserve(new_link).await? {
            Reservation::Reserved(link) => {
                metrics::counter!("shortlink_links_created_total", "kind" => "custom").increment(1);
                tracing::info!(slug = %link.slug, owner_id = ?link.owner_id, "Custom link created");
                Ok(link)
            }
            Reservation::Conflict => Err(AppError::slug_taken(
                "Slug is already taken",
                json!({ "slug": slug }),
            )),
        }
    }

    /// Reserves the first free random slug.
    ///
    /// Colliding candidates are retried transparently; the caller never sees
    /// a conflict on this path.
    async fn create_random(
        &self,
        original_url: String,
        owner_id: Option<AccountId>,
    ) -> Result<Link, AppError> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let slug = self.generator.generate(self.slug_length);

            if is_reserved_slug(&slug) {
                continue;
            }

            let new_link = NewLink {
                slug,
                original_url: original_url.clone(),
                owner_id,
            };

            match self.repository.reserve(new_link).await? {
                Reservation::Reserved(link) => {
                    metrics::counter!("shortlink_links_created_total", "kind" => "random")
                        .increment(1);
                    tracing::info!(slug = %link.slug, owner_id = ?link.owner_id, attempt, "Link created");
                    return Ok(link);
                }
                Reservation::Conflict => {
                    metrics::counter!("shortlink_slug_collisions_total").increment(1);
                    tracing::debug!(attempt, "Random slug collided, retrying");
                }
            }
        }

        Err(AppError::internal(
            "Failed to generate unique slug",
            json!({ "reason": "Too many collisions", "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Retrieves a link and its click count by slug.
    ///
    /// Has no click side effect, so it also backs the QR lookup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link holds the slug.
    pub async fn get_stats(&self, slug: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "slug": slug })))
    }

    /// Lists the caller's links, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for anonymous callers.
    pub async fn list_my_links(&self, caller: Caller) -> Result<Vec<Link>, AppError> {
        let owner_id = caller.account_id().ok_or_else(|| {
            AppError::unauthorized("Not authorized to access this route", json!({}))
        })?;

        self.repository.list_by_owner(owner_id).await
    }

    /// Permanently deletes a link owned by the caller.
    ///
    /// The slug becomes available to new reservations immediately.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if no link has this id
    /// - [`AppError::Forbidden`] if the caller does not own the link
    pub async fn delete_link(&self, caller: Caller, id: i64) -> Result<(), AppError> {
        let link = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if !can_delete(&caller, &link) {
            return Err(AppError::forbidden(
                "Not authorized to delete this link",
                json!({ "id": id }),
            ));
        }

        if !self.repository.delete(&link).await? {
            return Err(AppError::not_found("Link not found", json!({ "id": id })));
        }

        tracing::info!(slug = %link.slug, id, "Link deleted");
        Ok(())
    }

    /// Returns true if the registry's storage answers.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }

    /// Builds the public short URL for a slug.
    pub fn short_url(&self, slug: &str) -> String {
        format!("{}/{}", self.base_url, slug)
    }
}
