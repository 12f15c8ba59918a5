use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Not authorized, no token")]
    MissingToken,

    #[error("Not authorized")]
    InvalidToken(String),

    #[error("Not authorized")]
    TokenExpired,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Auth context not found - auth middleware not configured")]
    MissingContext,
}

impl AuthError {
    /// Whether the failure is the caller's fault (401) rather than ours.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            Self::MissingToken | Self::InvalidToken(_) | Self::TokenExpired
        )
    }
}

#[cfg(feature = "axum-ext")]
impl axum::response::IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::Json;
        use serde_json::json;

        let (status, message) = if self.is_unauthorized() {
            (StatusCode::UNAUTHORIZED, self.to_string())
        } else {
            tracing::error!(error = %self, "auth internal failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_owned(),
            )
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
