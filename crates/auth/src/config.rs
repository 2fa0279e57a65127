use chrono::Duration;

/// Default session token lifetime.
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

/// Process-wide authentication configuration.
///
/// Constructed once at startup and passed by reference into
/// [`crate::TokenIssuer`] and [`crate::AccessGuard`]; never a mutable
/// module-level singleton. Key rotation means restarting the process.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric signing secret for session tokens.
    pub signing_secret: String,
    /// Lifetime applied to tokens issued without an explicit TTL.
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(signing_secret: impl Into<String>) -> Self {
        Self {
            signing_secret: signing_secret.into(),
            token_ttl: Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}
