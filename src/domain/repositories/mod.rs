//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for service unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - The slug registry (reserve, resolve, list, delete)
//! - [`AccountRepository`] - Registered accounts
//!
//! # Testing
//!
//! See `tests/repository_memory.rs` and `tests/repository_pg.rs`.

pub mod account_repository;
pub mod link_repository;

pub use account_repository::AccountRepository;
pub use link_repository::{LinkRepository, Reservation};

#[cfg(test)]
pub use account_repository::MockAccountRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
