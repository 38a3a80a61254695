//! Credential component: JWT bearer tokens and Argon2 password hashes.

pub mod jwt;
pub mod password;

pub use jwt::JwtAuthority;
pub use password::{PasswordError, hash_password, verify_password};
