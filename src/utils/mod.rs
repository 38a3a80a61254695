//! Utility functions for slug generation, URL processing and error classification.
//!
//! - [`slug_generator`] - Random slug generation and custom slug validation
//! - [`url_normalizer`] - URL normalization and validation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod slug_generator;
pub mod url_normalizer;
