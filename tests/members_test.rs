// Member CRUD over HTTP.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{AGE, Auth, EMAIL, PASSWORD, TestApp};

#[tokio::test]
async fn create_member() {
    let app = TestApp::new();
    let res = app.create_member(EMAIL, PASSWORD, AGE).await;

    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.location(), format!("/members/{}", res.id()));
    assert!(res.body.get("password").is_none());
}

#[tokio::test]
async fn get_member() {
    let app = TestApp::new();
    let created = app.create_member(EMAIL, PASSWORD, AGE).await;

    let res = app.get(created.location(), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["email"], EMAIL);
    assert_eq!(res.body["age"], AGE);

    let missing = app.get("/members/999", Auth::Anonymous).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_member() {
    let app = TestApp::new();
    let created = app.create_member(EMAIL, PASSWORD, AGE).await;

    let res = app
        .put(
            created.location(),
            json!({ "email": "new@email.com", "password": "new", "age": 30 }),
            Auth::Anonymous,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get(created.location(), Auth::Anonymous).await;
    assert_eq!(res.body["email"], "new@email.com");
    assert_eq!(res.body["age"], 30_i64);

    // password is not part of the update
    let login = app.login_token("new@email.com", PASSWORD).await;
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn delete_member() {
    let app = TestApp::new();
    let created = app.create_member(EMAIL, PASSWORD, AGE).await;

    let res = app.delete(created.location(), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.get(created.location(), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_and_duplicate_members() {
    let app = TestApp::new();

    let res = app.create_member("not-an-email", PASSWORD, AGE).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "INVALID_EMAIL");

    let res = app.create_member(EMAIL, "", AGE).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app.create_member(EMAIL, PASSWORD, -1).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    app.create_member(EMAIL, PASSWORD, AGE).await;
    let res = app.create_member(EMAIL, PASSWORD, AGE).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn update_my_info() {
    let app = TestApp::new();
    app.create_member(EMAIL, PASSWORD, AGE).await;
    let token = app.access_token(EMAIL, PASSWORD).await;

    let res = app
        .put(
            "/members/me",
            json!({ "email": EMAIL, "age": 21 }),
            Auth::Bearer(&token),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["age"], 21_i64);

    let res = app.get("/members/me", Auth::Basic(EMAIL, PASSWORD)).await;
    assert_eq!(res.body["age"], 21_i64);
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let res = app.get("/health", Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "status": "ok" }));
}
