//! Slug generation and validation utilities.
//!
//! Random slugs are drawn uniformly from a 62-character alphanumeric alphabet
//! with a cryptographically secure RNG. Custom slugs supplied by users are
//! checked against the slug charset and a short list of reserved route words.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Alphabet for random slugs: `A-Z`, `a-z`, `0-9`.
pub const SLUG_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of random slugs (62^6, about 56.8 billion values).
pub const DEFAULT_SLUG_LENGTH: usize = 6;

/// Longest accepted custom slug.
pub const MAX_CUSTOM_SLUG_LENGTH: usize = 64;

/// Slugs that would shadow a top-level route.
pub const RESERVED_SLUGS: &[&str] = &["api", "health"];

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug regex is valid"));

/// Produces candidate slugs. Implementations never consult storage.
#[cfg_attr(test, mockall::automock)]
pub trait SlugGenerator: Send + Sync {
    fn generate(&self, length: usize) -> String;
}

/// Uniform random slugs from [`SLUG_ALPHABET`].
///
/// Uses the thread-local CSPRNG from `rand`, so consecutive slugs are not
/// predictable from one another.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSlugGenerator;

impl SlugGenerator for RandomSlugGenerator {
    fn generate(&self, length: usize) -> String {
        let mut rng = rand::rng();

        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..SLUG_ALPHABET.len());
                SLUG_ALPHABET[idx] as char
            })
            .collect()
    }
}

/// Returns true if the string matches `[A-Za-z0-9_-]+`.
pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

/// Returns true if the slug collides with a top-level route.
pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
}

/// Validates a user-provided custom slug.
///
/// # Rules
///
/// - Allowed characters: letters, digits, underscores, hyphens
/// - At most [`MAX_CUSTOM_SLUG_LENGTH`] characters
/// - Not a reserved route word
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_slug(slug: &str) -> Result<(), AppError> {
    if !is_valid_slug(slug) {
        return Err(AppError::bad_request(
            "Slug can only contain letters, numbers, underscores and hyphens",
            json!({ "slug": slug }),
        ));
    }

    if slug.len() > MAX_CUSTOM_SLUG_LENGTH {
        return Err(AppError::bad_request(
            format!("Slug must be at most {MAX_CUSTOM_SLUG_LENGTH} characters"),
            json!({ "provided_length": slug.len() }),
        ));
    }

    if is_reserved_slug(slug) {
        return Err(AppError::bad_request(
            "This slug is reserved",
            json!({ "slug": slug }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_unique_characters() {
        let unique: HashSet<_> = SLUG_ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_has_requested_length() {
        let generator = RandomSlugGenerator;
        assert_eq!(generator.generate(DEFAULT_SLUG_LENGTH).len(), 6);
        assert_eq!(generator.generate(10).len(), 10);
    }

    #[test]
    fn test_generate_uses_alphanumeric_characters() {
        let slug = RandomSlugGenerator.generate(64);
        assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_produces_distinct_slugs() {
        let generator = RandomSlugGenerator;
        let slugs: HashSet<String> = (0..1000)
            .map(|_| generator.generate(DEFAULT_SLUG_LENGTH))
            .collect();

        assert_eq!(slugs.len(), 1000);
    }

    #[test]
    fn test_generate_covers_alphabet() {
        let generator = RandomSlugGenerator;
        let seen: HashSet<char> = (0..200)
            .flat_map(|_| generator.generate(32).chars().collect::<Vec<_>>())
            .collect();

        assert_eq!(seen.len(), 62);
    }

    #[test]
    fn test_validate_accepts_mixed_case_and_symbols() {
        assert!(validate_custom_slug("my-link").is_ok());
        assert!(validate_custom_slug("My_Link_2024").is_ok());
        assert!(validate_custom_slug("a").is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_characters() {
        for slug in ["my link", "my/link", "link!", "émoji", ""] {
            let result = validate_custom_slug(slug);
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "'{slug}' should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_too_long() {
        let slug = "a".repeat(MAX_CUSTOM_SLUG_LENGTH + 1);
        let err = validate_custom_slug(&slug).unwrap_err();
        assert!(err.to_string().contains("at most"));
    }

    #[test]
    fn test_validate_rejects_reserved() {
        for &reserved in RESERVED_SLUGS {
            assert!(validate_custom_slug(reserved).is_err());
        }
        assert!(validate_custom_slug("API").is_err());
    }
}
