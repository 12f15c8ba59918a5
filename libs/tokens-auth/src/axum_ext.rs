//! Axum extractor and middleware for bearer auth

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{context::AuthContext, errors::AuthError, traits::TokenValidator};

/// Extractor for the authenticated caller - requires [`require_auth`] upstream
#[derive(Debug, Clone)]
pub struct Authn(pub AuthContext);

impl<S> FromRequestParts<S> for Authn
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(Authn)
            .ok_or(AuthError::MissingContext)
    }
}

#[derive(Clone)]
pub struct AuthState {
    validator: Arc<dyn TokenValidator>,
}

impl AuthState {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }
}

/// Bearer auth gate.
///
/// Rejects the request with 401 when the header is missing or the token does
/// not verify; the downstream handler never runs in that case. On success the
/// caller's [`AuthContext`] is placed in request extensions.
pub async fn require_auth(
    State(AuthState { validator }): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(request.headers()) else {
        return AuthError::MissingToken.into_response();
    };

    let claims = match validator.validate_and_parse(token).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = ?err, "bearer token rejected");
            return err.into_response();
        }
    };

    request.extensions_mut().insert(AuthContext::from(claims));
    next.run(request).await
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
