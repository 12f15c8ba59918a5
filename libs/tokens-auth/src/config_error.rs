use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("auth.jwt_secret must not be empty")]
    EmptySecret,

    #[error("auth.jwt_secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("auth.issuer must not be empty")]
    EmptyIssuer,

    #[error("auth.token_ttl must be greater than zero")]
    ZeroTtl,
}
