/**
 * Session Tokens
 *
 * This module issues and verifies the signed bearer tokens that carry a
 * user's identity between requests.
 *
 * # Token Format
 *
 * Tokens are HS256 JWTs with the claims `userId`, `username`, `iat` and `exp`.
 * The signing secret is read once at startup; a `TokenIssuer` is immutable
 * afterwards and shared through `Arc`.
 *
 * # Verification Outcomes
 *
 * - `TokenError::Expired` - signature valid, `exp` in the past (no leeway)
 * - `TokenError::Invalid` - malformed, bad signature, wrong algorithm or claims shape
 * - `TokenError::Internal` - anything else the JWT library reports
 */

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::ConfigError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Username at the time of issue
    pub username: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Why a token could not be issued or verified
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("token is invalid")]
    Invalid,
    #[error("token processing failed: {0}")]
    Internal(String),
}

/// Signs and verifies session tokens with one process-wide secret
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Build an issuer from the signing secret
    ///
    /// # Arguments
    /// * `secret` - HMAC secret; must not be blank
    /// * `ttl` - lifetime of issued tokens
    ///
    /// # Errors
    /// `ConfigError::MissingValue("JWT_SECRET")` for a blank secret
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, ConfigError> {
        if secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Create a token for a user
    ///
    /// # Arguments
    /// * `user_id` - Database ID of the user
    /// * `username` - Username carried in the claims
    ///
    /// # Returns
    /// Compact JWT string
    pub fn issue(&self, user_id: i64, username: &str) -> Result<String, TokenError> {
        let iat = unix_now()?;
        let exp = iat
            .checked_add(self.ttl.as_secs())
            .ok_or_else(|| TokenError::Internal("token expiry overflows".to_string()))?;
        let claims = Claims {
            user_id,
            username: username.to_string(),
            iat,
            exp,
        };
        self.sign(&claims)
    }

    /// Sign arbitrary claims with this issuer's key
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Internal(e.to_string()))
    }

    /// Verify and decode a token
    ///
    /// The signature is checked before expiry, so a tampered token that is
    /// also expired reports `Invalid`.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| classify(e.kind()))
    }
}

fn classify(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::ImmatureSignature
        | ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::InvalidSubject
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenError::Invalid,
        other => TokenError::Internal(format!("{:?}", other)),
    }
}

fn unix_now() -> Result<u64, TokenError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| TokenError::Internal(e.to_string()))
}
