//! Stateless bearer-token authentication.
//!
//! Tokens are HS256 JWTs binding a user id (`sub`) with an expiry. There is no
//! session store and no revocation list: a token is valid while its signature
//! checks out and `exp` has not passed.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod claims;
pub mod config;
pub mod config_error;
pub mod context;
pub mod errors;
pub mod jwt;
pub mod secret;
pub mod traits;

#[cfg(feature = "axum-ext")]
pub mod axum_ext;

pub use claims::Claims;
pub use config::AuthConfig;
pub use config_error::ConfigError;
pub use context::AuthContext;
pub use errors::AuthError;
pub use jwt::JwtTokenService;
pub use secret::JwtSecret;
pub use traits::{IssuedToken, TokenIssuer, TokenValidator};
