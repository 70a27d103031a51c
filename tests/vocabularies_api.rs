//! Integration tests for the vocabulary endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error_code, auth_token, body_json, delete, get, patch_json, post_json};
use serde_json::json;
use sqlx::SqlitePool;

/// Create a level and a lesson under it, returning the lesson id.
async fn create_lesson(app: &axum::Router, token: &str) -> i64 {
    let level = body_json(
        post_json(
            app,
            "/levels",
            Some(token),
            json!({ "level": 1, "name": "HSK 1" }),
        )
        .await,
    )
    .await;

    let response = post_json(
        app,
        "/lessons",
        Some(token),
        json!({ "levelId": level["id"], "title": "Food", "orderIndex": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn create_vocabulary_returns_201(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);
    let lesson_id = create_lesson(&app, &token).await;

    let response = post_json(
        &app,
        "/vocabularies",
        Some(&token),
        json!({
            "lessonId": lesson_id,
            "hanzi": "苹果",
            "pinyin": "píngguǒ",
            "meaningVn": "quả táo",
            "exampleHanzi": "我喜欢吃苹果。",
            "exampleMeaning": "Tôi thích ăn táo."
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let vocab = body_json(response).await;
    assert_eq!(vocab["hanzi"], "苹果");
    assert_eq!(vocab["meaningVn"], "quả táo");
    assert_eq!(vocab["lessonId"], lesson_id);
    assert!(vocab["audioUrl"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn missing_required_fields_are_all_reported(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let response = post_json(&app, "/vocabularies", Some(&token), json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "validation_error");
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"lessonId"));
    assert!(fields.contains(&"hanzi"));
    assert!(fields.contains(&"pinyin"));
    assert!(fields.contains(&"meaningVn"));
}

#[sqlx::test(migrations = "./migrations")]
async fn unknown_lesson_id_is_bad_request(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);

    let response = post_json(
        &app,
        "/vocabularies",
        Some(&token),
        json!({ "lessonId": 999, "hanzi": "水", "pinyin": "shuǐ", "meaningVn": "nước" }),
    )
    .await;
    assert_error_code(response, StatusCode::BAD_REQUEST, "bad_request").await;
}

#[sqlx::test(migrations = "./migrations")]
async fn list_vocabularies_embeds_lesson(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);
    let lesson_id = create_lesson(&app, &token).await;

    for hanzi in ["一", "二"] {
        post_json(
            &app,
            "/vocabularies",
            Some(&token),
            json!({ "lessonId": lesson_id, "hanzi": hanzi, "pinyin": "x", "meaningVn": "y" }),
        )
        .await;
    }

    let response = get(&app, "/vocabularies").await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 2);
    for item in items {
        assert_eq!(item["lesson"]["title"], "Food");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_updates_meaning_and_audio(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);
    let lesson_id = create_lesson(&app, &token).await;

    let vocab = body_json(
        post_json(
            &app,
            "/vocabularies",
            Some(&token),
            json!({ "lessonId": lesson_id, "hanzi": "茶", "pinyin": "chá", "meaningVn": "trà" }),
        )
        .await,
    )
    .await;
    let id = vocab["id"].as_i64().unwrap();

    let response = patch_json(
        &app,
        &format!("/vocabularies/{id}"),
        Some(&token),
        json!({ "meaningVn": "trà (nước uống)", "audioUrl": "http://localhost:3000/uploads/cha.mp3" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["meaningVn"], "trà (nước uống)");
    assert_eq!(updated["audioUrl"], "http://localhost:3000/uploads/cha.mp3");
    assert_eq!(updated["hanzi"], "茶");
}

#[sqlx::test(migrations = "./migrations")]
async fn patch_null_audio_url_clears_it(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);
    let lesson_id = create_lesson(&app, &token).await;

    let vocab = body_json(
        post_json(
            &app,
            "/vocabularies",
            Some(&token),
            json!({
                "lessonId": lesson_id,
                "hanzi": "水",
                "pinyin": "shuǐ",
                "meaningVn": "nước",
                "audioUrl": "http://localhost:3000/uploads/shui.mp3"
            }),
        )
        .await,
    )
    .await;
    let id = vocab["id"].as_i64().unwrap();

    let response = patch_json(
        &app,
        &format!("/vocabularies/{id}"),
        Some(&token),
        json!({ "audioUrl": null }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert!(updated["audioUrl"].is_null());
    assert_eq!(updated["hanzi"], "水");
}

#[sqlx::test(migrations = "./migrations")]
async fn each_item_gets_its_own_lesson(pool: SqlitePool) {
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

    let mut lesson_ids = Vec::new();
    for (title, order) in [("Food", 1), ("Animals", 2), ("Unused", 3)] {
        let lesson = body_json(
            post_json(
                &app,
                "/lessons",
                Some(&token),
                json!({ "levelId": level["id"], "title": title, "orderIndex": order }),
            )
            .await,
        )
        .await;
        lesson_ids.push(lesson["id"].as_i64().unwrap());
    }

    post_json(
        &app,
        "/vocabularies",
        Some(&token),
        json!({ "lessonId": lesson_ids[0], "hanzi": "米饭", "pinyin": "mǐfàn", "meaningVn": "cơm" }),
    )
    .await;
    post_json(
        &app,
        "/vocabularies",
        Some(&token),
        json!({ "lessonId": lesson_ids[1], "hanzi": "猫", "pinyin": "māo", "meaningVn": "mèo" }),
    )
    .await;

    let response = get(&app, "/vocabularies").await;
    let list = body_json(response).await;
    let items = list.as_array().unwrap();
    assert_eq!(items.len(), 2);

    for item in items {
        let expected_title = if item["hanzi"] == "米饭" { "Food" } else { "Animals" };
        assert_eq!(item["lesson"]["title"], expected_title);
        assert_eq!(item["lesson"]["id"], item["lessonId"]);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn delete_vocabulary_returns_deleted_row(pool: SqlitePool) {
    let app = common::build_app(&pool);
    let token = auth_token(1);
    let lesson_id = create_lesson(&app, &token).await;

    let vocab = body_json(
        post_json(
            &app,
            "/vocabularies",
            Some(&token),
            json!({ "lessonId": lesson_id, "hanzi": "山", "pinyin": "shān", "meaningVn": "núi" }),
        )
        .await,
    )
    .await;
    let id = vocab["id"].as_i64().unwrap();

    let response = delete(&app, &format!("/vocabularies/{id}"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["hanzi"], "山");

    let gone = get(&app, &format!("/vocabularies/{id}")).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
