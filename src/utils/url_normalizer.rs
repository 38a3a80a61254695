//! URL normalization and validation for link targets.
//!
//! Users commonly paste bare host names (`example.com`), so a missing scheme is
//! filled in with `https://` before validation. The normalized string is what
//! gets stored; it is not otherwise rewritten.

use regex::Regex;
use std::sync::LazyLock;
use url::{Host, Url};

/// Scheme, dot-separated host ending in an alphabetic TLD, optional port,
/// optional path/query/fragment without whitespace.
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .expect("URL pattern is valid")
});

/// Errors that can occur during URL normalization.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Please provide a URL")]
    Missing,

    #[error("Please provide a valid URL")]
    InvalidFormat(String),

    #[error("URL must point to a domain name")]
    InvalidHost,
}

/// Normalizes a user-supplied URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. Without an `http://`/`https://` prefix (any case), `https://` is prepended
/// 3. The result must match the canonical pattern and parse with a domain host
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Missing`] for blank input,
/// [`UrlNormalizationError::InvalidFormat`] if the pattern or parser rejects it,
/// and [`UrlNormalizationError::InvalidHost`] for non-domain hosts.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com").unwrap(), "https://example.com");
/// assert_eq!(normalize_url("http://a.io/x?y=1").unwrap(), "http://a.io/x?y=1");
/// assert!(normalize_url("localhost").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Missing);
    }

    let candidate = if has_http_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    if !URL_PATTERN.is_match(&candidate) {
        return Err(UrlNormalizationError::InvalidFormat(
            "URL does not match scheme://host[:port][/path]".to_string(),
        ));
    }

    let parsed =
        Url::parse(&candidate).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.host() {
        Some(Host::Domain(_)) => Ok(candidate),
        _ => Err(UrlNormalizationError::InvalidHost),
    }
}

fn has_http_scheme(input: &str) -> bool {
    let lower = input
        .get(..8)
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| input.to_ascii_lowercase());

    lower.starts_with("http://") || lower.starts_with("https://")
}
