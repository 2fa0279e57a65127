//! Stateless, symmetric-key signed session tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AuthConfig;

/// Claims carried by a session token.
///
/// Minimal by design: the subject (principal email) and the validity window.
/// No claim is trusted unless the signature check passes first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the authenticated principal's email.
    pub sub: String,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds). The token is invalid at and after this instant.
    pub exp: i64,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, malformed token, or missing claims.
    #[error("invalid token")]
    Invalid,

    /// Signature was fine but the validity window has closed.
    #[error("token has expired")]
    Expired,
}

impl From<TokenError> for ledgerkeep_core::DomainError {
    // Both failure modes surface identically to callers; distinguishing an
    // expired token from a forged one gains an attacker nothing but keeps
    // the variants testable here.
    fn from(_: TokenError) -> Self {
        ledgerkeep_core::DomainError::Unauthorized
    }
}

/// Mints and validates time-bounded signed session tokens.
///
/// Tokens are stateless: validity is purely a function of signature and
/// expiry at verification time, with no server-side revocation list. The
/// signing key comes from [`AuthConfig`] and is never rotated in-process.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    default_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.signing_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.signing_secret.as_bytes()),
            default_ttl: config.token_ttl,
        }
    }

    /// Issue a token for `subject` with the configured default TTL.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, self.default_ttl, Utc::now())
    }

    /// Issue a token valid from `now` until `now + ttl`.
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verify a token against the current wall clock.
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and claims, returning the subject.
    ///
    /// Expiry is checked here rather than by jsonwebtoken's built-in
    /// leeway-based validation: a token is invalid at exactly its expiry
    /// instant, so a TTL of zero never grants access.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp"]);

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| TokenError::Invalid)?;

        if now.timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims.sub)
    }
}
