// Favorites: creation is validated against the line network, deletion is owner-only.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{AGE, Auth, EMAIL, PASSWORD, TestApp};

struct Fixture {
    app: TestApp,
    token: String,
    madeul: i64,
    junggye: i64,
    haeundae: i64,
}

// junggye -(3)- nowon -(7)- madeul on line 7; haeundae is on no line
async fn fixture() -> Fixture {
    let app = TestApp::new();
    let madeul = app.create_station("마들역").await;
    let nowon = app.create_station("노원역").await;
    let junggye = app.create_station("중계역").await;
    let line = app.create_line("7호선", junggye, madeul, 10).await;
    let res = app.add_section(line, junggye, nowon, 3).await;
    assert_eq!(res.status, StatusCode::OK);
    let haeundae = app.create_station("해운대역").await;

    app.create_member(EMAIL, PASSWORD, AGE).await;
    let token = app.access_token(EMAIL, PASSWORD).await;

    Fixture {
        app,
        token,
        madeul,
        junggye,
        haeundae,
    }
}

async fn create_favorite(f: &Fixture, source: i64, target: i64, auth: Auth<'_>) -> common::TestResponse {
    f.app
        .post("/favorites", json!({ "source": source, "target": target }), auth)
        .await
}

#[tokio::test]
async fn create_favorite_between_connected_stations() {
    let f = fixture().await;
    let res = create_favorite(&f, f.junggye, f.madeul, Auth::Bearer(&f.token)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    assert_eq!(res.location(), format!("/favorites/{}", res.id()));

    let list = f.app.get("/favorites", Auth::Bearer(&f.token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body[0]["source"]["name"], "중계역");
    assert_eq!(list.body[0]["target"]["name"], "마들역");
}

#[tokio::test]
async fn unconnected_stations_are_rejected() {
    let f = fixture().await;
    let res = create_favorite(&f, f.junggye, f.haeundae, Auth::Bearer(&f.token)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "UNCONNECTED_STATIONS");

    let res = create_favorite(&f, f.junggye, f.junggye, Auth::Bearer(&f.token)).await;
    assert_eq!(res.body["error"]["code"], "SAME_STATION");

    let res = create_favorite(&f, f.junggye, 999, Auth::Bearer(&f.token)).await;
    assert_eq!(res.body["error"]["code"], "STATION_NOT_FOUND");
}

#[tokio::test]
async fn create_favorite_requires_login() {
    let f = fixture().await;
    let res = create_favorite(&f, f.junggye, f.madeul, Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_own_favorite() {
    let f = fixture().await;
    let created = create_favorite(&f, f.junggye, f.madeul, Auth::Bearer(&f.token)).await;

    let res = f.app.delete(created.location(), Auth::Bearer(&f.token)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let list = f.app.get("/favorites", Auth::Bearer(&f.token)).await;
    assert_eq!(list.body, json!([]));
}

#[tokio::test]
async fn delete_favorite_without_login() {
    let f = fixture().await;
    let created = create_favorite(&f, f.junggye, f.madeul, Auth::Bearer(&f.token)).await;

    let res = f.app.delete(created.location(), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn delete_other_members_favorite() {
    let f = fixture().await;
    let created = create_favorite(&f, f.junggye, f.madeul, Auth::Bearer(&f.token)).await;

    f.app.create_member("otherMember@gmail.com", PASSWORD, 80).await;
    let other = f.app.access_token("otherMember@gmail.com", PASSWORD).await;

    let res = f.app.delete(created.location(), Auth::Bearer(&other)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let missing = f.app.delete("/favorites/999", Auth::Bearer(&other)).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favorites_are_listed_per_member() {
    let f = fixture().await;
    create_favorite(&f, f.junggye, f.madeul, Auth::Bearer(&f.token)).await;

    f.app.create_member("otherMember@gmail.com", PASSWORD, 80).await;
    let res = f
        .app
        .get("/favorites", Auth::Basic("otherMember@gmail.com", PASSWORD))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn token_of_a_deleted_member_cannot_use_favorites() {
    let f = fixture().await;
    let res = f.app.delete("/members/me", Auth::Bearer(&f.token)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = create_favorite(&f, f.junggye, f.madeul, Auth::Bearer(&f.token)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let list = f.app.get("/favorites", Auth::Bearer(&f.token)).await;
    assert_eq!(list.status, StatusCode::UNAUTHORIZED);

    let res = f.app.delete("/favorites/1", Auth::Bearer(&f.token)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}
