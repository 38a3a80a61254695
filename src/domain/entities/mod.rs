//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Link`] - A slug bound to a target URL, click counter and optional owner
//! - [`Account`] - A registered user who can own links
//!
//! Creation inputs live in separate structs (`NewLink`, `NewAccount`) so that
//! storage-assigned fields (`id`, `created_at`, `clicks`) never appear in them.

pub mod account;
pub mod link;

pub use account::{Account, AccountId, NewAccount, normalize_email};
pub use link::{Link, NewLink};
