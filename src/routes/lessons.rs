//! # 레슨 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /lessons`      → 레슨 목록 (orderIndex 오름차순, 소속 급수 포함)
//! - `POST   /lessons`      → 새 레슨 생성 (201)
//! - `GET    /lessons/{id}` → 단일 레슨 조회
//! - `PATCH  /lessons/{id}` → 레슨 부분 업데이트
//! - `DELETE /lessons/{id}` → 레슨 삭제 (단어/대사가 남아 있으면 409)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::*,
    routes::AppState,
    services::cache::Resource,
    services::validation,
};

/// 레슨 변경 시 무효화할 캐시 키: 단어/대사 목록이 레슨을 품고 있습니다.
const INVALIDATES: &[Resource] = &[
    Resource::Lessons,
    Resource::Vocabularies,
    Resource::DialogueLines,
];

/// `GET /lessons` — 전체 레슨 목록을 조회합니다.
pub async fn list_lessons(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if let Some(cached) = state.cache.get(Resource::Lessons).await {
        return Ok(Json(cached));
    }

    let lessons = db::list_lessons(&state.pool).await?;
    let value = serde_json::to_value(&lessons)
        .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;
    state.cache.put(Resource::Lessons, value.clone()).await;
    Ok(Json(value))
}

/// `GET /lessons/{id}` — 단일 레슨을 소속 급수와 함께 조회합니다.
pub async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = db::get_lesson(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(lesson))
}

/// `POST /lessons` — 새 레슨을 생성합니다. (인증 필요)
pub async fn create_lesson(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let new = validation::validate_new_lesson(&req)?;
    let lesson = db::create_lesson(&state.pool, &new).await?;
    state.cache.invalidate(INVALIDATES).await;
    Ok((StatusCode::CREATED, Json(lesson)))
}

/// `PATCH /lessons/{id}` — 레슨을 부분 업데이트합니다. (인증 필요)
pub async fn update_lesson(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLessonRequest>,
) -> Result<Json<Lesson>, AppError> {
    let patch = validation::validate_lesson_patch(&req)?;
    let lesson = db::update_lesson(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(lesson))
}

/// `DELETE /lessons/{id}` — 레슨을 삭제하고 삭제된 행을 반환합니다. (인증 필요)
pub async fn delete_lesson(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = db::delete_lesson(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(lesson))
}
