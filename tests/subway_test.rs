// Stations, lines, sections and shortest paths over HTTP.

use axum::http::StatusCode;
use serde_json::json;

mod common;
use common::{Auth, TestApp};

fn station_names(body: &serde_json::Value) -> Vec<String> {
    body["stations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn stations_crud() {
    let app = TestApp::new();
    let id = app.create_station("강남역").await;
    app.create_station("역삼역").await;

    let list = app.get("/stations", Auth::Anonymous).await;
    assert_eq!(list.body.as_array().unwrap().len(), 2);

    let res = app.delete(&format!("/stations/{id}"), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let list = app.get("/stations", Auth::Anonymous).await;
    assert_eq!(list.body[0]["name"], "역삼역");
}

#[tokio::test]
async fn station_on_a_line_cannot_be_deleted() {
    let app = TestApp::new();
    let a = app.create_station("a").await;
    let b = app.create_station("b").await;
    app.create_line("1", a, b, 10).await;

    let res = app.delete(&format!("/stations/{a}"), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "STATION_IN_USE");
}

#[tokio::test]
async fn line_lifecycle() {
    let app = TestApp::new();
    let a = app.create_station("a").await;
    let b = app.create_station("b").await;
    let line = app.create_line("신분당선", a, b, 10).await;

    let res = app.get(&format!("/lines/{line}"), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "신분당선");
    assert_eq!(station_names(&res.body), ["a", "b"]);

    let res = app
        .put(
            &format!("/lines/{line}"),
            json!({ "name": "분당선", "color": "bg-yellow-600" }),
            Auth::Anonymous,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app.get("/lines", Auth::Anonymous).await;
    assert_eq!(res.body[0]["name"], "분당선");
    assert_eq!(res.body[0]["color"], "bg-yellow-600");

    let res = app.delete(&format!("/lines/{line}"), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let res = app.get(&format!("/lines/{line}"), Auth::Anonymous).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sections_keep_one_ordered_chain() {
    let app = TestApp::new();
    let a = app.create_station("a").await;
    let b = app.create_station("b").await;
    let c = app.create_station("c").await;
    let d = app.create_station("d").await;
    let line = app.create_line("1", a, c, 10).await;

    // split, then extend both ends
    assert_eq!(app.add_section(line, a, b, 4).await.status, StatusCode::OK);
    assert_eq!(app.add_section(line, c, d, 5).await.status, StatusCode::OK);
    let e = app.create_station("e").await;
    assert_eq!(app.add_section(line, e, a, 2).await.status, StatusCode::OK);

    let res = app.get(&format!("/lines/{line}"), Auth::Anonymous).await;
    assert_eq!(station_names(&res.body), ["e", "a", "b", "c", "d"]);

    // e -> d keeps the total distance of the chain
    let path = app
        .get(&format!("/paths?source={e}&target={d}"), Auth::Anonymous)
        .await;
    assert_eq!(path.body["distance"], 17_i64);
}

#[tokio::test]
async fn invalid_sections_are_rejected() {
    let app = TestApp::new();
    let a = app.create_station("a").await;
    let b = app.create_station("b").await;
    let x = app.create_station("x").await;
    let y = app.create_station("y").await;
    let line = app.create_line("1", a, b, 10).await;

    let cases = [
        (a, b, 5, "SECTION_ALREADY_REGISTERED"),
        (x, y, 5, "SECTION_NOT_CONNECTED"),
        (a, x, 10, "INVALID_DISTANCE"),
        (a, 999, 5, "STATION_NOT_FOUND"),
    ];
    for (up, down, distance, code) in cases {
        let res = app.add_section(line, up, down, distance).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{code}");
        assert_eq!(res.body["error"]["code"], code);
    }
}

#[tokio::test]
async fn removing_stations_from_a_line() {
    let app = TestApp::new();
    let a = app.create_station("a").await;
    let b = app.create_station("b").await;
    let c = app.create_station("c").await;
    let line = app.create_line("1", a, b, 10).await;
    app.add_section(line, b, c, 5).await;

    let res = app
        .delete(&format!("/lines/{line}/sections?stationId={b}"), Auth::Anonymous)
        .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.get(&format!("/lines/{line}"), Auth::Anonymous).await;
    assert_eq!(station_names(&res.body), ["a", "c"]);

    let res = app
        .delete(&format!("/lines/{line}/sections?stationId={a}"), Auth::Anonymous)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "LAST_SECTION");
}

#[tokio::test]
async fn long_sections_keep_their_distance() {
    let app = TestApp::new();
    let a = app.create_station("a").await;
    let b = app.create_station("b").await;
    let c = app.create_station("c").await;
    let line = app.create_line("1", a, b, i64::from(i32::MAX)).await;
    let res = app.add_section(line, b, c, i64::from(i32::MAX)).await;
    assert_eq!(res.status, StatusCode::OK);

    let res = app
        .get(&format!("/paths?source={a}&target={c}"), Auth::Anonymous)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["distance"], 2 * i64::from(i32::MAX));

    let res = app
        .delete(&format!("/lines/{line}/sections?stationId={b}"), Auth::Anonymous)
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "INVALID_DISTANCE");

    let res = app.get(&format!("/lines/{line}"), Auth::Anonymous).await;
    assert_eq!(station_names(&res.body), ["a", "b", "c"]);
}

#[tokio::test]
async fn shortest_path_across_lines() {
    let app = TestApp::new();
    let gyodae = app.create_station("교대역").await;
    let gangnam = app.create_station("강남역").await;
    let yangjae = app.create_station("양재역").await;
    let nambu = app.create_station("남부터미널역").await;

    // 교대 -(10)- 강남 -(10)- 양재, 교대 -(2)- 남부터미널 -(3)- 양재
    app.create_line("2호선", gyodae, gangnam, 10).await;
    app.create_line("신분당선", gangnam, yangjae, 10).await;
    let line3 = app.create_line("3호선", gyodae, nambu, 2).await;
    app.add_section(line3, nambu, yangjae, 3).await;

    let res = app
        .get(
            &format!("/paths?source={gyodae}&target={yangjae}"),
            Auth::Anonymous,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(station_names(&res.body), ["교대역", "남부터미널역", "양재역"]);
    assert_eq!(res.body["distance"], 5_i64);

    let lonely = app.create_station("lonely").await;
    let res = app
        .get(
            &format!("/paths?source={gyodae}&target={lonely}"),
            Auth::Anonymous,
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"]["code"], "UNCONNECTED_STATIONS");
}
