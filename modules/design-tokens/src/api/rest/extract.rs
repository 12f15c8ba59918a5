use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, OptionalFromRequest, Request};
use serde_json::{Map, Value};

use super::error::ApiError;

/// `Json<T>` whose rejection renders as our `{"message"}` 400 body.
///
/// As `Option<JsonBody<T>>` a request without a `Content-Type` yields `None`;
/// a body that is present but not JSON is still rejected.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl JsonBody<Value> {
    /// The request object, or `{}` when no body was sent.
    #[must_use]
    pub fn or_empty(body: Option<Self>) -> Value {
        body.map_or_else(|| Value::Object(Map::new()), |Self(value)| value)
    }
}

fn reject(rejection: &JsonRejection) -> ApiError {
    tracing::debug!(error = %rejection, "rejected request body");
    ApiError::bad_request(rejection.body_text())
}

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(&rejection)),
        }
    }
}

impl<S, T> OptionalFromRequest<S> for JsonBody<T>
where
    Json<T>: OptionalFromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        match <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await {
            Ok(body) => Ok(body.map(|Json(value)| Self(value))),
            Err(rejection) => Err(reject(&rejection)),
        }
    }
}
