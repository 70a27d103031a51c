//! # 회화 대사 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /dialogue-lines`      → 대사 목록 (orderIndex 오름차순, 소속 레슨 포함)
//! - `POST   /dialogue-lines`      → 새 대사 생성 (201)
//! - `GET    /dialogue-lines/{id}` → 단일 대사 조회
//! - `PATCH  /dialogue-lines/{id}` → 대사 부분 업데이트
//! - `DELETE /dialogue-lines/{id}` → 대사 삭제

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

const INVALIDATES: &[Resource] = &[Resource::DialogueLines];

/// `GET /dialogue-lines` — 전체 대사 목록을 조회합니다.
pub async fn list_dialogue_lines(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if let Some(cached) = state.cache.get(Resource::DialogueLines).await {
        return Ok(Json(cached));
    }

    let lines = db::list_dialogue_lines(&state.pool).await?;
    let value = serde_json::to_value(&lines)
        .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;
    state.cache.put(Resource::DialogueLines, value.clone()).await;
    Ok(Json(value))
}

/// `GET /dialogue-lines/{id}` — 단일 대사를 소속 레슨과 함께 조회합니다.
pub async fn get_dialogue_line(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DialogueLine>, AppError> {
    let line = db::get_dialogue_line(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(line))
}

/// `POST /dialogue-lines` — 새 대사를 생성합니다. (인증 필요)
pub async fn create_dialogue_line(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateDialogueLineRequest>,
) -> Result<(StatusCode, Json<DialogueLine>), AppError> {
    let new = validation::validate_new_dialogue_line(&req)?;
    let line = db::create_dialogue_line(&state.pool, &new).await?;
    state.cache.invalidate(INVALIDATES).await;
    Ok((StatusCode::CREATED, Json(line)))
}

/// `PATCH /dialogue-lines/{id}` — 대사를 부분 업데이트합니다. (인증 필요)
pub async fn update_dialogue_line(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDialogueLineRequest>,
) -> Result<Json<DialogueLine>, AppError> {
    let patch = validation::validate_dialogue_line_patch(&req)?;
    let line = db::update_dialogue_line(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(line))
}

/// `DELETE /dialogue-lines/{id}` — 대사를 삭제하고 삭제된 행을 반환합니다. (인증 필요)
pub async fn delete_dialogue_line(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<DialogueLine>, AppError> {
    let line = db::delete_dialogue_line(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(line))
}
