//! DTOs for link shortening endpoint.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};

/// Request to shorten a URL.
///
/// Both fields are optional on the wire so a missing URL is reported as a
/// validation error rather than a body rejection. An empty `slug` means "pick
/// one for me".
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    #[serde(default)]
    pub original_url: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub slug: Option<String>,
}
