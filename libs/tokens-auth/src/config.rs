//! Configuration for token issuing and verification.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config_error::ConfigError;
use crate::secret::JwtSecret;

/// Minimum HS256 secret length accepted at startup.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens. Empty until configured.
    #[serde(default)]
    pub jwt_secret: JwtSecret,

    /// Value of the `iss` claim; tokens from other issuers are rejected.
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Lifetime of issued tokens.
    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,

    /// Clock skew tolerated when checking `exp`.
    #[serde(default = "default_leeway_seconds")]
    pub leeway_seconds: u64,
}

fn default_issuer() -> String {
    "design-tokens".to_owned()
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(30 * 24 * 60 * 60)
}

fn default_leeway_seconds() -> u64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::with_secret(String::new())
    }
}

impl AuthConfig {
    /// Config with defaults for everything except the secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: JwtSecret::new(secret),
            issuer: default_issuer(),
            token_ttl: default_token_ttl(),
            leeway_seconds: default_leeway_seconds(),
        }
    }

    /// # Errors
    /// Returns `ConfigError` for an empty or short secret, an empty issuer or a zero TTL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if self.jwt_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort {
                min: MIN_SECRET_LEN,
                actual: self.jwt_secret.len(),
            });
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::EmptyIssuer);
        }
        if self.token_ttl.is_zero() {
            return Err(ConfigError::ZeroTtl);
        }
        Ok(())
    }
}
