#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use argon2::Params;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use design_tokens::{Argon2Hasher, DesignTokensModule};
use serde_json::{Value, json};
use tokens_auth::{AuthConfig, JwtTokenService};
use tokens_store::{DocumentStore, StoreConfig};
use tower::ServiceExt;

pub const SECRET: &str = "design-tokens-test-secret-0123456789";
pub const MISSING_ID: &str = "000000000000000000000000";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<DocumentStore>,
    pub tokens: Arc<JwtTokenService>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(DocumentStore::connect(&StoreConfig::default()).unwrap());
        let tokens = Arc::new(JwtTokenService::new(&AuthConfig::with_secret(SECRET)).unwrap());
        let hasher = Arc::new(Argon2Hasher::new(
            Params::new(Params::MIN_M_COST, 1, 1, None).unwrap(),
        ));
        let module = DesignTokensModule::new(&store, hasher, tokens.clone()).unwrap();
        let router = module.router(tokens.clone());
        Self {
            router,
            store,
            tokens,
        }
    }

    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let resp = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Sign up a fresh user and return `(user_id, token)`.
    pub async fn signup(&self, email: &str) -> (String, String) {
        let (status, json) = self
            .call(
                "POST",
                "/api/users",
                None,
                Some(&json!({ "name": "Test", "email": email, "password": "password" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        (
            json["_id"].as_str().unwrap().to_owned(),
            json["token"].as_str().unwrap().to_owned(),
        )
    }

    /// Create one palette, font set and spacing scale; returns their ids.
    pub async fn assets(&self, token: &str) -> (String, String, String) {
        let (_, palette) = self
            .call(
                "POST",
                "/api/palette/",
                Some(token),
                Some(&json!({
                    "primaryColors": [{ "hexCode": "#FFFFFF" }, { "hexCode": "#000000" }],
                    "secondaryColors": [],
                    "textColors": [],
                    "backgroundColors": [],
                    "extraColors": []
                })),
            )
            .await;
        let (_, fonts) = self
            .call(
                "POST",
                "/api/fonts/",
                Some(token),
                Some(&json!({
                    "headingFontName": "Inter",
                    "parragraphFontName": "Inter",
                    "baseSize": 80,
                    "scaleFactor": "Major Third (1.250)"
                })),
            )
            .await;
        let (_, spacings) = self
            .call(
                "POST",
                "/api/spacings/",
                Some(token),
                Some(&json!({ "baseSize": 80, "scaleFactor": "Major Third (1.250)" })),
            )
            .await;
        (
            palette["_id"].as_str().unwrap().to_owned(),
            fonts["data"]["_id"].as_str().unwrap().to_owned(),
            spacings["data"]["_id"].as_str().unwrap().to_owned(),
        )
    }
}
