//! # 단어 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /vocabularies`      → 단어 목록 (삽입 순서, 소속 레슨 포함)
//! - `POST   /vocabularies`      → 새 단어 생성 (201)
//! - `GET    /vocabularies/{id}` → 단일 단어 조회
//! - `PATCH  /vocabularies/{id}` → 단어 부분 업데이트
//! - `DELETE /vocabularies/{id}` → 단어 삭제

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

const INVALIDATES: &[Resource] = &[Resource::Vocabularies];

/// `GET /vocabularies` — 전체 단어 목록을 조회합니다.
pub async fn list_vocabularies(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if let Some(cached) = state.cache.get(Resource::Vocabularies).await {
        return Ok(Json(cached));
    }

    let vocabularies = db::list_vocabularies(&state.pool).await?;
    let value = serde_json::to_value(&vocabularies)
        .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;
    state.cache.put(Resource::Vocabularies, value.clone()).await;
    Ok(Json(value))
}

/// `GET /vocabularies/{id}` — 단일 단어를 소속 레슨과 함께 조회합니다.
pub async fn get_vocabulary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vocabulary>, AppError> {
    let vocabulary = db::get_vocabulary(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(vocabulary))
}

/// `POST /vocabularies` — 새 단어를 생성합니다. (인증 필요)
pub async fn create_vocabulary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateVocabularyRequest>,
) -> Result<(StatusCode, Json<Vocabulary>), AppError> {
    let new = validation::validate_new_vocabulary(&req)?;
    let vocabulary = db::create_vocabulary(&state.pool, &new).await?;
    state.cache.invalidate(INVALIDATES).await;
    Ok((StatusCode::CREATED, Json(vocabulary)))
}

/// `PATCH /vocabularies/{id}` — 단어를 부분 업데이트합니다. (인증 필요)
pub async fn update_vocabulary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateVocabularyRequest>,
) -> Result<Json<Vocabulary>, AppError> {
    let patch = validation::validate_vocabulary_patch(&req)?;
    let vocabulary = db::update_vocabulary(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(vocabulary))
}

/// `DELETE /vocabularies/{id}` — 단어를 삭제하고 삭제된 행을 반환합니다. (인증 필요)
pub async fn delete_vocabulary(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Vocabulary>, AppError> {
    let vocabulary = db::delete_vocabulary(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(vocabulary))
}
