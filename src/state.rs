//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkResolver, LinkService};
use crate::domain::repositories::{AccountRepository, LinkRepository};
use crate::infrastructure::qr::QrRenderer;

/// Services behind trait objects so one router serves every storage backend.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub resolver: Arc<LinkResolver<dyn LinkRepository>>,
    pub auth_service: Arc<AuthService<dyn AccountRepository>>,
    pub qr_renderer: Arc<dyn QrRenderer>,
    /// Redirect target for unknown slugs.
    pub fallback_url: Arc<str>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService<dyn LinkRepository>>,
        resolver: Arc<LinkResolver<dyn LinkRepository>>,
        auth_service: Arc<AuthService<dyn AccountRepository>>,
        qr_renderer: Arc<dyn QrRenderer>,
        fallback_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            link_service,
            resolver,
            auth_service,
            qr_renderer,
            fallback_url: fallback_url.into(),
        }
    }
}
