use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Registered JWT claims carried by every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user id. See <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.2>
    pub sub: String,

    /// Issuer. See <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1.1>
    pub iss: String,

    /// Issued-at, seconds since the epoch.
    pub iat: i64,

    /// Expiration, seconds since the epoch.
    pub exp: i64,
}

impl Claims {
    #[must_use]
    pub fn new(subject: &str, issuer: &str, issued_at: OffsetDateTime, ttl: Duration) -> Self {
        let iat = issued_at.unix_timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: subject.to_owned(),
            iss: issuer.to_owned(),
            iat,
            exp: iat.saturating_add(ttl_secs),
        }
    }
}
