//! HS256 bearer tokens for accounts.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::credentials::{CredentialVerifier, TokenIssuer};
use crate::domain::entities::AccountId;
use crate::error::AppError;

const DEFAULT_EXPIRY_HOURS: i64 = 168;

/// Token claims. `sub` is the account id in decimal.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies account tokens with a shared secret.
pub struct JwtAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry: Duration,
}

impl JwtAuthority {
    pub fn new(secret: &str, expiry_hours: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            expiry: i64::try_from(expiry_hours)
                .ok()
                .and_then(Duration::try_hours)
                .unwrap_or_else(|| Duration::hours(DEFAULT_EXPIRY_HOURS)),
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

impl TokenIssuer for JwtAuthority {
    fn issue(&self, account_id: AccountId) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to issue token", json!({ "reason": e.to_string() }))
        })
    }
}

impl CredentialVerifier for JwtAuthority {
    fn verify(&self, token: &str) -> Option<AccountId> {
        match self.decode_claims(token) {
            Ok(claims) => claims.sub.parse().ok(),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected bearer token");
                None
            }
        }
    }
}
