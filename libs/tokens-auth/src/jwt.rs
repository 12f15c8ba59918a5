//! HS256 token issuer and validator.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use time::OffsetDateTime;

use crate::claims::Claims;
use crate::config::AuthConfig;
use crate::config_error::ConfigError;
use crate::errors::AuthError;
use crate::traits::{IssuedToken, TokenIssuer, TokenValidator};

/// Signs and verifies bearer tokens with a shared HMAC secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: Duration,
}

impl JwtTokenService {
    /// # Errors
    /// Returns `ConfigError` if the config does not validate.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let secret = config.jwt_secret.expose();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            issuer: config.issuer.clone(),
            ttl: config.token_ttl,
        })
    }

    /// Sign a token as if issued at `issued_at`.
    ///
    /// # Errors
    /// Returns `AuthError::Signing` if encoding fails.
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: OffsetDateTime,
    ) -> Result<IssuedToken, AuthError> {
        let claims = Claims::new(subject, &self.issuer, issued_at, self.ttl);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        Ok(IssuedToken {
            token,
            expires_at: claims.exp,
        })
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, subject: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, OffsetDateTime::now_utc())
    }
}

#[async_trait]
impl TokenValidator for JwtTokenService {
    async fn validate_and_parse(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::InvalidToken("empty subject".to_owned()));
        }
        Ok(data.claims)
    }
}
