//! Slug resolution for the redirect path.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::slug_generator::is_valid_slug;

/// Result of resolving a slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The slug is bound; its click counter has already been incremented.
    Found(Link),
    /// Unknown or malformed slug. Callers send the visitor to the landing page.
    Fallback,
}

/// Resolves slugs and counts clicks.
///
/// Each hit costs exactly one storage round trip: the registry's atomic
/// `increment_clicks`, which also returns the target URL.
pub struct LinkResolver<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkResolver<L> {
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Resolves a slug, incrementing its click counter on a hit.
    ///
    /// Slugs outside the slug charset can never be bound, so they fall back
    /// without touching storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] only on storage failure. A miss is
    /// [`Resolution::Fallback`], never an error.
    pub async fn resolve(&self, slug: &str) -> Result<Resolution, AppError> {
        if !is_valid_slug(slug) {
            metrics::counter!("shortlink_redirects_total", "outcome" => "fallback").increment(1);
            return Ok(Resolution::Fallback);
        }

        match self.repository.increment_clicks(slug).await? {
            Some(link) => {
                metrics::counter!("shortlink_redirects_total", "outcome" => "hit").increment(1);
                tracing::debug!(slug, clicks = link.clicks, "Slug resolved");
                Ok(Resolution::Found(link))
            }
            None => {
                metrics::counter!("shortlink_redirects_total", "outcome" => "fallback")
                    .increment(1);
                tracing::debug!(slug, "Unknown slug, falling back");
                Ok(Resolution::Fallback)
            }
        }
    }
}
