//! Domain layer containing business entities and rules.
//!
//! The domain layer has no dependencies on infrastructure or presentation.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions (the slug registry lives here)
//! - [`ownership`] - Caller identity and who may create custom slugs or delete links
//! - [`credentials`] - Token verification and issuance interfaces
//!
//! # Resolution Flow
//!
//! 1. HTTP handler receives `GET /{slug}`
//! 2. [`crate::application::services::LinkResolver`] calls
//!    [`repositories::LinkRepository::increment_clicks`], one atomic storage operation
//! 3. On a hit the handler redirects to the original URL, on a miss to the landing page

pub mod credentials;
pub mod entities;
pub mod ownership;
pub mod repositories;
