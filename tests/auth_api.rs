//! Integration tests for login and the authenticated identity endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, seed_admin, ADMIN_EMAIL, ADMIN_PASSWORD};
use serde_json::json;
use sqlx::SqlitePool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn login_with_valid_credentials_returns_token_and_user(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_app(&pool);

    let response = post_json(
        &app,
        "/auth/login",
        None,
        json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["access_token"].as_str().unwrap().contains('.'));
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["role"], "ADMIN");
    // The password hash must never leave the server.
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_app(&pool);

    let response = post_json(
        &app,
        "/auth/login",
        None,
        json!({ "email": ADMIN_EMAIL, "password": "wrong" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn login_with_unknown_email_uses_the_same_message(pool: SqlitePool) {
    let app = common::build_app(&pool);

    let response = post_json(
        &app,
        "/auth/login",
        None,
        json!({ "email": "nobody@example.com", "password": "password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn me_returns_the_token_owner(pool: SqlitePool) {
    seed_admin(&pool).await;
    let app = common::build_app(&pool);

    let login = body_json(
        post_json(
            &app,
            "/auth/login",
            None,
            json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }),
        )
        .await,
    )
    .await;
    let token = login["access_token"].as_str().unwrap();

    let request = axum::http::Request::builder()
        .uri("/auth/me")
        .header("authorization", format!("Bearer {token}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["email"], ADMIN_EMAIL);
    assert_eq!(body["fullName"], "Admin User");
}

#[sqlx::test(migrations = "./migrations")]
async fn me_without_token_is_unauthorized(pool: SqlitePool) {
    let app = common::build_app(&pool);

    let response = get(&app, "/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "missing_token");
}

#[sqlx::test(migrations = "./migrations")]
async fn garbage_token_is_rejected(pool: SqlitePool) {
    let app = common::build_app(&pool);

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/levels")
        .header("authorization", "Bearer not-a-jwt")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            json!({ "level": 1, "name": "HSK 1" }).to_string(),
        ))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "invalid_token");
}
