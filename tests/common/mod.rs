// Shared across the numbered test files; not every file uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use serde_json::{Map, Value};
use tower::ServiceExt;

use user_api::auth;
use user_api::config::AppConfig;
use user_api::context::AppContext;
use user_api::routes;
use user_api::store::{MemoryStore, UserStore};

pub const SECRET: &str = "integration-test-secret";

/// Builds the application over a fresh in-memory store, so every test file
/// runs against its own isolated state with no postgres required.
pub fn test_app() -> Router {
    let config = AppConfig {
        port: 0,
        database_url: "postgres://unused".to_string(),
        token_secret: SECRET.to_string(),
    };
    let store: Arc<dyn UserStore> = Arc::new(MemoryStore::new());
    routes::app(AppContext::new(store, config))
}

/// A valid short-lived bearer token, the way a logged-in client would hold one.
pub fn bearer_token() -> String {
    let mut payload = Map::new();
    payload.insert("username".to_string(), Value::String("user".to_string()));
    payload.insert("password".to_string(), Value::String("user".to_string()));
    let token = auth::sign(payload, SECRET, Some(chrono::Duration::seconds(30)))
        .expect("sign test token");
    format!("Bearer {token}")
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    auth_header: Option<&str>,
    body: Option<Value>,
) -> Result<Response<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header(header::AUTHORIZATION, value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json)?))?,
        None => builder.body(Body::empty())?,
    };

    Ok(app.clone().oneshot(request).await?)
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

/// Creates a user through the API and returns its stored record.
pub async fn create_user(app: &Router, name: &str, account_type: &str, password: &str) -> Result<Value> {
    let response = send(
        app,
        Method::POST,
        "/user",
        Some(&bearer_token()),
        Some(serde_json::json!({
            "name": name,
            "account_type": account_type,
            "password": password,
        })),
    )
    .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await?;
    Ok(body["data"].clone())
}
