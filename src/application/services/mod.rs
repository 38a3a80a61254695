//! Business logic services for the application layer.

pub mod auth_service;
pub mod link_resolver;
pub mod link_service;

pub use auth_service::{AuthService, Session};
pub use link_resolver::{LinkResolver, Resolution};
pub use link_service::LinkService;
