#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Design system endpoints and their referential checks.

mod common;

use axum::http::StatusCode;
use common::{MISSING_ID, TestApp};
use serde_json::{Value, json};

struct Setup {
    app: TestApp,
    user_id: String,
    token: String,
    body: Value,
}

async fn setup() -> Setup {
    let app = TestApp::new();
    let (user_id, token) = app.signup("ds@example.com").await;
    let (palette_id, fonts_id, spacings_id) = app.assets(&token).await;
    let body = json!({
        "name": "Test 1",
        "userId": user_id,
        "paletteId": palette_id,
        "fontsId": fonts_id,
        "spacingsId": spacings_id,
    });
    Setup {
        app,
        user_id,
        token,
        body,
    }
}

impl Setup {
    async fn create(&self, body: &Value) -> (StatusCode, Value) {
        self.app
            .call("POST", "/api/design-system", Some(&self.token), Some(body))
            .await
    }
}

#[tokio::test]
async fn create_and_read_back() {
    let s = setup().await;
    let (status, created) = s.create(&s.body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Design system created successfully");
    for field in ["name", "userId", "paletteId", "fontsId", "spacingsId"] {
        assert_eq!(created["data"][field], s.body[field], "{field}");
    }

    let id = created["data"]["_id"].as_str().unwrap();
    let (status, fetched) = s
        .app
        .call("GET", &format!("/api/design-system/{id}"), Some(&s.token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);
}

#[tokio::test]
async fn dangling_user_fails_naming_user_id() {
    let s = setup().await;
    let mut body = s.body.clone();
    body["userId"] = json!(MISSING_ID);

    let (status, res) = s.create(&body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "DesignSystem validation failed: userId: Invalid ID(s)");
}

#[tokio::test]
async fn malformed_references_are_combined() {
    let s = setup().await;
    let mut body = s.body.clone();
    body["userId"] = json!("1");
    body["spacingsId"] = json!("2");

    let (status, res) = s.create(&body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res["message"],
        "DesignSystem validation failed: userId: Invalid ID(s), spacingsId: Invalid ID(s)"
    );
}

#[tokio::test]
async fn dangling_and_malformed_references_are_combined() {
    let s = setup().await;
    let mut body = s.body.clone();
    body["userId"] = json!(MISSING_ID);
    body["paletteId"] = json!("1");

    let (status, res) = s.create(&body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res["message"],
        "DesignSystem validation failed: userId: Invalid ID(s), paletteId: Invalid ID(s)"
    );
}

#[tokio::test]
async fn list_by_user_returns_only_that_users_systems() {
    let s = setup().await;
    s.create(&s.body).await;
    let mut second = s.body.clone();
    second["name"] = json!("Test 2");
    s.create(&second).await;

    let (other_id, other_token) = s.app.signup("other@example.com").await;
    let (p, f, sp) = s.app.assets(&other_token).await;
    s.create(&json!({
        "name": "Other",
        "userId": other_id,
        "paletteId": p,
        "fontsId": f,
        "spacingsId": sp,
    }))
    .await;

    let (status, res) = s
        .app
        .call(
            "GET",
            &format!("/api/design-system/users/{}", s.user_id),
            Some(&s.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = res["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ds| ds["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Test 1", "Test 2"]);

    let (status, res) = s
        .app
        .call(
            "GET",
            &format!("/api/design-system/users/{MISSING_ID}"),
            Some(&s.token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"], json!([]));

    let (status, res) = s
        .app
        .call("GET", "/api/design-system/users/0", Some(&s.token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "Invalid user id syntax");
}

#[tokio::test]
async fn update_renames_and_keeps_references() {
    let s = setup().await;
    let (_, created) = s.create(&s.body).await;
    let id = created["data"]["_id"].as_str().unwrap();

    let (status, res) = s
        .app
        .call(
            "PUT",
            &format!("/api/design-system/{id}"),
            Some(&s.token),
            Some(&json!({ "name": "Test 2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Design system updated successfully");
    assert_eq!(res["data"]["name"], "Test 2");
    assert_eq!(res["data"]["paletteId"], s.body["paletteId"]);
}

#[tokio::test]
async fn update_of_unknown_or_malformed_id() {
    let s = setup().await;

    let (status, res) = s
        .app
        .call(
            "PUT",
            &format!("/api/design-system/{MISSING_ID}"),
            Some(&s.token),
            Some(&json!({ "name": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Design system not found");

    let (status, res) = s
        .app
        .call("PUT", &format!("/api/design-system/{MISSING_ID}"), Some(&s.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Design system not found");

    let (status, res) = s
        .app
        .call("PUT", "/api/design-system/0", Some(&s.token), Some(&json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["message"], "Invalid design system id syntax");

    let (status, res) = s
        .app
        .call("GET", &format!("/api/design-system/{MISSING_ID}"), Some(&s.token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["message"], "Design system not found");
}

#[tokio::test]
async fn delete_then_delete_again() {
    let s = setup().await;
    let (_, created) = s.create(&s.body).await;
    let uri = format!("/api/design-system/{}", created["data"]["_id"].as_str().unwrap());

    let (status, res) = s.app.call("DELETE", &uri, Some(&s.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["message"], "Design system deleted successfully");
    assert_eq!(res["data"], json!({ "deletedCount": 1 }));

    let (status, res) = s.app.call("DELETE", &uri, Some(&s.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        res["message"],
        "Invalid design system id syntax or design system not found"
    );
    assert_eq!(res["data"], json!({ "deletedCount": 0 }));

    let (status, res) = s
        .app
        .call("DELETE", "/api/design-system/0", Some(&s.token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res["message"],
        "Invalid design system id syntax or design system not found"
    );
}
