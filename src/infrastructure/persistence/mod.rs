//! Repository implementations.
//!
//! Concrete implementations of domain repository traits: PostgreSQL via SQLx
//! runtime-checked queries, and in-process maps for development and tests.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Slug registry backed by the `links` table
//! - [`PgAccountRepository`] - Accounts backed by the `accounts` table
//! - [`MemoryLinkRepository`] - Slug registry in memory
//! - [`MemoryAccountRepository`] - Accounts in memory

pub mod memory_account_repository;
pub mod memory_link_repository;
pub mod pg_account_repository;
pub mod pg_link_repository;

pub use memory_account_repository::MemoryAccountRepository;
pub use memory_link_repository::MemoryLinkRepository;
pub use pg_account_repository::PgAccountRepository;
pub use pg_link_repository::PgLinkRepository;
