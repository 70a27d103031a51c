//! Shared helpers for integration tests.
//!
//! Builds the full application router against a test pool and a temp
//! uploads directory, so tests exercise the same routing, body limits,
//! and middleware stack that production uses.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use hskstudio::build_router;
use hskstudio::middleware::auth::create_access_token;
use hskstudio::routes::AppState;
use hskstudio::services::cache::ListCache;

pub const TEST_SECRET: &str = "test-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password";

/// Build the application router with the given pool and uploads directory.
pub fn build_test_app(pool: &SqlitePool, uploads_path: &str) -> Router {
    let state = AppState {
        pool: pool.clone(),
        uploads_path: uploads_path.to_string(),
        public_base_url: "http://localhost:3000".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        cache: ListCache::new(),
    };
    build_router(state)
}

/// Build the router with a throwaway uploads directory, for tests that
/// never touch the upload endpoints.
pub fn build_app(pool: &SqlitePool) -> Router {
    build_test_app(pool, "/tmp/hskstudio-test-uploads")
}

/// Mint a valid access token. The extractor only verifies the signature,
/// so a matching user row is not required for write endpoints.
pub fn auth_token(user_id: i64) -> String {
    create_access_token(user_id, TEST_SECRET).unwrap()
}

/// Seed the admin account the same way the server does on boot.
pub async fn seed_admin(pool: &SqlitePool) {
    hskstudio::db::seed::ensure_admin_user(pool, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(request(Method::GET, uri, None, None))
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    app.clone()
        .oneshot(request(Method::POST, uri, token, Some(body)))
        .await
        .unwrap()
}

pub async fn patch_json(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    app.clone()
        .oneshot(request(Method::PATCH, uri, token, Some(body)))
        .await
        .unwrap()
}

pub async fn delete(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    app.clone()
        .oneshot(request(Method::DELETE, uri, token, None))
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    use http_body_util::BodyExt;
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Assert an error body has the expected machine-readable code.
pub async fn assert_error_code(response: Response<Body>, expected_status: StatusCode, code: &str) {
    assert_eq!(response.status(), expected_status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
}
