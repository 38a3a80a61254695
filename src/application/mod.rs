//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and ownership rules. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, listing, stats and deletion
//! - [`services::link_resolver::LinkResolver`] - Slug resolution with click counting
//! - [`services::auth_service::AuthService`] - Accounts and bearer-token authentication

pub mod services;
