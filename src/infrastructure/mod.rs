//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory repository implementations
//! - [`auth`] - JWT tokens and Argon2 password hashing
//! - [`qr`] - QR code rendering

pub mod auth;
pub mod persistence;
pub mod qr;
