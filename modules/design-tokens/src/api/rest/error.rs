use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::{Map, Value, json};

use crate::domain::error::DomainError;

/// JSON error response: `{"message": ..., ...extra}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    extra: Map<String, Value>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            extra: Map::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "An internal error occurred")
    }

    /// Attach an extra top-level field to the body.
    #[must_use]
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_owned(), value);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = self.extra;
        body.insert("message".to_owned(), Value::String(self.message));
        (self.status, Json(Value::Object(body))).into_response()
    }
}

/// Map domain error to an HTTP error
impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        let message = e.to_string();
        match e {
            DomainError::InvalidCredentials => Self::new(StatusCode::UNAUTHORIZED, message),
            DomainError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            DomainError::InvalidShape(violations) => Self::bad_request(message.clone())
                .with("result", Value::String(message))
                .with("errors", json!(violations)),
            DomainError::DesignSystemNotDeleted { malformed: false } => {
                Self::new(StatusCode::NOT_FOUND, message).with("data", json!({ "deletedCount": 0 }))
            }
            DomainError::MissingFields
            | DomainError::UserAlreadyExists
            | DomainError::InvalidId(_)
            | DomainError::InvalidReferences(_)
            | DomainError::DesignSystemNotDeleted { malformed: true } => Self::bad_request(message),
            DomainError::Hashing(_) | DomainError::Auth(_) | DomainError::Store(_) => {
                tracing::error!(error = %message, "request failed");
                Self::internal()
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::error::Resource;
    use crate::domain::validation::FieldViolation;
    use tokens_store::StoreError;

    async fn body(err: ApiError) -> (StatusCode, Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn shape_errors_carry_structured_details() {
        let err: ApiError = DomainError::InvalidShape(vec![FieldViolation::new(
            "primaryColors",
            "string",
            "object",
        )])
        .into();

        let (status, json) = body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "primaryColors is of type string but should be object");
        assert_eq!(json["result"], json["message"]);
        assert_eq!(json["errors"][0]["actualType"], "string");
        assert_eq!(json["errors"][0]["expectedType"], "object");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let (status, json) = body(DomainError::not_found(Resource::Palette, "x").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "No palette with id: x");
    }

    #[tokio::test]
    async fn design_system_delete_miss_reports_zero_count() {
        let (status, json) =
            body(DomainError::DesignSystemNotDeleted { malformed: false }.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["data"]["deletedCount"], 0);

        let (status, json) =
            body(DomainError::DesignSystemNotDeleted { malformed: true }.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let (status, json) = body(DomainError::Store(StoreError::Disconnected).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn invalid_credentials_is_401() {
        let (status, json) = body(DomainError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["message"], "Invalid credentials");
    }
}
