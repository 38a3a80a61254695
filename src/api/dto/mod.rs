//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; account
//! requests are additionally checked with `validator`.

pub mod auth;
pub mod health;
pub mod link;
pub mod qr;
pub mod shorten;
pub mod stats;
