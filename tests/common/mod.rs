// Shared helpers for the HTTP-level tests.
//
// Every test builds its own router over the in-memory backends and drives it with
// `tower::ServiceExt::oneshot`, so tests never share state.
#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde_json::{Value, json};
use tower::ServiceExt;

use subway_api::{
    app::build_router,
    config::Config,
    repos::Repos,
    services::cache::MemoryCache,
    state::AppState,
};

pub const EMAIL: &str = "email@email.com";
pub const PASSWORD: &str = "password";
pub const AGE: i64 = 20;

const JWT_SECRET: &str = "test-secret-test-secret-test-secret!";

#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    Anonymous,
    Basic(&'a str, &'a str),
    Bearer(&'a str),
    Session(&'a str),
}

#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn location(&self) -> &str {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    pub fn id(&self) -> i64 {
        self.body["id"].as_i64().unwrap()
    }
}

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::in_memory(JWT_SECRET);
        let state =
            AppState::new(&config, Repos::memory(), Arc::new(MemoryCache::new())).unwrap();
        Self {
            router: build_router(state, &config),
        }
    }

    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let res = self.router.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        auth: Auth<'_>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        builder = match auth {
            Auth::Anonymous => builder,
            Auth::Basic(email, password) => builder.header(
                header::AUTHORIZATION,
                format!("Basic {}", BASE64.encode(format!("{email}:{password}"))),
            ),
            Auth::Bearer(token) => {
                builder.header(header::AUTHORIZATION, format!("Bearer {token}"))
            }
            Auth::Session(id) => builder.header(header::COOKIE, format!("SESSION={id}")),
        };

        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(req).await
    }

    pub async fn get(&self, uri: &str, auth: Auth<'_>) -> TestResponse {
        self.request(Method::GET, uri, None, auth).await
    }

    pub async fn post(&self, uri: &str, body: Value, auth: Auth<'_>) -> TestResponse {
        self.request(Method::POST, uri, Some(body), auth).await
    }

    pub async fn put(&self, uri: &str, body: Value, auth: Auth<'_>) -> TestResponse {
        self.request(Method::PUT, uri, Some(body), auth).await
    }

    pub async fn delete(&self, uri: &str, auth: Auth<'_>) -> TestResponse {
        self.request(Method::DELETE, uri, None, auth).await
    }

    // --- fixtures ---

    pub async fn create_member(&self, email: &str, password: &str, age: i64) -> TestResponse {
        self.post(
            "/members",
            json!({ "email": email, "password": password, "age": age }),
            Auth::Anonymous,
        )
        .await
    }

    pub async fn login_token(&self, email: &str, password: &str) -> TestResponse {
        self.post(
            "/login/token",
            json!({ "email": email, "password": password }),
            Auth::Anonymous,
        )
        .await
    }

    pub async fn access_token(&self, email: &str, password: &str) -> String {
        let res = self.login_token(email, password).await;
        assert_eq!(res.status, StatusCode::OK);
        res.body["accessToken"].as_str().unwrap().to_string()
    }

    pub async fn login_form(&self, email: &str, password: &str) -> TestResponse {
        let form = format!(
            "email={}&password={}",
            email.replace('@', "%40"),
            password
        );
        let req = Request::builder()
            .method(Method::POST)
            .uri("/login/form")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();
        self.send(req).await
    }

    /// Logs in through the form and returns the `SESSION` cookie value.
    pub async fn session(&self, email: &str, password: &str) -> String {
        let res = self.login_form(email, password).await;
        assert_eq!(res.status, StatusCode::OK);
        session_from_set_cookie(&res.headers).unwrap()
    }

    pub async fn create_station(&self, name: &str) -> i64 {
        let res = self
            .post("/stations", json!({ "name": name }), Auth::Anonymous)
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.id()
    }

    pub async fn create_line(&self, name: &str, up: i64, down: i64, distance: i64) -> i64 {
        let res = self
            .post(
                "/lines",
                json!({
                    "name": name,
                    "color": "bg-red-600",
                    "upStationId": up,
                    "downStationId": down,
                    "distance": distance,
                }),
                Auth::Anonymous,
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
        res.id()
    }

    pub async fn add_section(&self, line_id: i64, up: i64, down: i64, distance: i64) -> TestResponse {
        self.post(
            &format!("/lines/{line_id}/sections"),
            json!({ "upStationId": up, "downStationId": down, "distance": distance }),
            Auth::Anonymous,
        )
        .await
    }
}

pub fn session_from_set_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|c| c.strip_prefix("SESSION="))
        .and_then(|rest| rest.split(';').next())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}
