//! Integration tests for the HSK level endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error_code, auth_token, body_json, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "./migrations")]
async fn create_level_returns_201_with_camel_case_body(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let response = post_json(
        &app,
        "/levels",
        Some(&token),
        json!({ "level": 1, "name": "HSK 1", "description": "Beginner" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let level = body_json(response).await;
    assert_eq!(level["level"], 1);
    assert_eq!(level["name"], "HSK 1");
    assert_eq!(level["description"], "Beginner");
    assert!(level["id"].is_i64());
    assert!(level["createdAt"].is_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn create_level_accepts_string_level(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let response = post_json(
        &app,
        "/levels",
        Some(&token),
        json!({ "level": "3", "name": "HSK 3" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["level"], 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn level_out_of_range_is_rejected_with_field_error(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    for bad_level in [0, 7] {
        let response = post_json(
            &app,
            "/levels",
            Some(&token),
            json!({ "level": bad_level, "name": "HSK ?" }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], "validation_error");
        let fields = body["fields"].as_array().unwrap();
        assert!(fields.iter().any(|f| f["field"] == "level"));
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn blank_name_is_rejected(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let response = post_json(
        &app,
        "/levels",
        Some(&token),
        json!({ "level": 2, "name": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let fields = body["fields"].as_array().unwrap();
    assert!(fields.iter().any(|f| f["field"] == "name"));
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_level_number_conflicts(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let first = post_json(
        &app,
        "/levels",
        Some(&token),
        json!({ "level": 1, "name": "HSK 1" }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        &app,
        "/levels",
        Some(&token),
        json!({ "level": 1, "name": "HSK 1 again" }),
    )
    .await;
    assert_error_code(second, StatusCode::CONFLICT, "conflict").await;
}

#[sqlx::test(migrations = "./migrations")]
async fn list_levels_is_sorted_by_level_ascending(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    for (level, name) in [(3, "HSK 3"), (1, "HSK 1"), (2, "HSK 2")] {
        let response = post_json(
            &app,
            "/levels",
            Some(&token),
            json!({ "level": level, "name": name }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(&app, "/levels").await;
    assert_eq!(response.status(), StatusCode::OK);
    let levels = body_json(response).await;
    let numbers: Vec<i64> = levels
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["level"].as_i64().unwrap())
        .collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[sqlx::test(migrations = "./migrations")]
async fn get_level_embeds_its_lessons(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let level = body_json(
        post_json(
            &app,
            "/levels",
            Some(&token),
            json!({ "level": 1, "name": "HSK 1" }),
        )
        .await,
    )
    .await;
    let level_id = level["id"].as_i64().unwrap();

    let lesson = post_json(
        &app,
        "/lessons",
        Some(&token),
        json!({ "levelId": level_id, "title": "Greetings", "orderIndex": 1 }),
    )
    .await;
    assert_eq!(lesson.status(), StatusCode::CREATED);

    let response = get(&app, &format!("/levels/{level_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let lessons = body["lessons"].as_array().unwrap();
    assert_eq!(lessons.len(), 1);
    assert_eq!(lessons[0]["title"], "Greetings");
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_unknown_level_is_404(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let response = patch_json(&app, "/levels/999", Some(&token), json!({ "name": "X" })).await;
    assert_error_code(response, StatusCode::NOT_FOUND, "not_found").await;
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_updates_only_provided_fields(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let level = body_json(
        post_json(
            &app,
            "/levels",
            Some(&token),
            json!({ "level": 4, "name": "HSK 4", "description": "Upper Intermediate" }),
        )
        .await,
    )
    .await;
    let id = level["id"].as_i64().unwrap();

    let response = patch_json(
        &app,
        &format!("/levels/{id}"),
        Some(&token),
        json!({ "name": "HSK 4 (revised)" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["name"], "HSK 4 (revised)");
    assert_eq!(updated["description"], "Upper Intermediate");
    assert_eq!(updated["level"], 4);
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_null_description_clears_it(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let level = body_json(
        post_json(
            &app,
            "/levels",
            Some(&token),
            json!({ "level": 5, "name": "HSK 5", "description": "Advanced" }),
        )
        .await,
    )
    .await;
    let id = level["id"].as_i64().unwrap();

    let response = patch_json(
        &app,
        &format!("/levels/{id}"),
        Some(&token),
        json!({ "description": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert!(updated["description"].is_null());
    assert_eq!(updated["name"], "HSK 5");
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_level_with_lessons_conflicts(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let level = body_json(
        post_json(
            &app,
            "/levels",
            Some(&token),
            json!({ "level": 1, "name": "HSK 1" }),
        )
        .await,
    )
    .await;
    let level_id = level["id"].as_i64().unwrap();

    post_json(
        &app,
        "/lessons",
        Some(&token),
        json!({ "levelId": level_id, "title": "Greetings", "orderIndex": 1 }),
    )
    .await;

    let response = delete(&app, &format!("/levels/{level_id}"), Some(&token)).await;
    assert_error_code(response, StatusCode::CONFLICT, "conflict").await;

    // The level must still exist.
    let still_there = get(&app, &format!("/levels/{level_id}")).await;
    assert_eq!(still_there.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_empty_level_returns_deleted_entity(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let level = body_json(
        post_json(
            &app,
            "/levels",
            Some(&token),
            json!({ "level": 6, "name": "HSK 6" }),
        )
        .await,
    )
    .await;
    let id = level["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/levels/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "HSK 6");

    let gone = get(&app, &format!("/levels/{id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn writes_require_authentication(pool: SqlitePool) {
    let app = common::build_app(&pool);

    let response = post_json(&app, "/levels", None, json!({ "level": 1, "name": "HSK 1" })).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = delete(&app, "/levels/1", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_reflects_writes_after_cache_invalidation(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    // Prime the list cache with an empty list.
    let response = get(&app, "/levels").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    post_json(
        &app,
        "/levels",
        Some(&token),
        json!({ "level": 1, "name": "HSK 1" }),
    )
    .await;

    let response = get(&app, "/levels").await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}
