use async_trait::async_trait;

use crate::{claims::Claims, errors::AuthError};

/// A freshly signed bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Validates bearer tokens
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Verify signature, issuer and expiry and return the claims
    async fn validate_and_parse(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Signs bearer tokens bound to a subject
pub trait TokenIssuer: Send + Sync {
    /// # Errors
    /// Returns `AuthError::Signing` if the token cannot be encoded.
    fn issue(&self, subject: &str) -> Result<IssuedToken, AuthError>;
}
