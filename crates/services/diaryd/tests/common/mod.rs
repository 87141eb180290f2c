#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use diary_auth::{auth_body::AuthBody, jwt::JwtKeys};
use diary_models::store::memory::MemoryStore;
use diary_web::state::AppState;
use diaryd::api::router;
use serde_json::Value;
use tower::util::ServiceExt;

pub const JWT_SECRET: &[u8] = b"integration-secret";

#[derive(Clone)]
pub struct TestContext {
    pub app: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestContext {
    pub fn new() -> Self {
        let state = AppState::new(MemoryStore::new(), JwtKeys::new(JWT_SECRET));
        Self { app: router(state) }
    }

    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send_request(request.body(body).unwrap()).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
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

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.send(
            "POST",
            "/api/users",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.send(
            "POST",
            "/api/users/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await
    }

    /// Registers `username` and returns a fresh token for it.
    pub async fn token_for(&self, username: &str, password: &str) -> String {
        assert_eq!(self.register(username, password).await.status, StatusCode::CREATED);
        let login = self.login(username, password).await;
        assert_eq!(login.status, StatusCode::OK);
        let login: AuthBody = serde_json::from_value(login.body).unwrap();
        login.token
    }
}
