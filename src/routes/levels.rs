//! # HSK 급수 라우트 핸들러
//!
//! ## 엔드포인트
//! - `GET    /levels`      → 급수 목록 (level 오름차순, 캐시 경유)
//! - `POST   /levels`      → 새 급수 생성 (201)
//! - `GET    /levels/{id}` → 단일 급수 조회 (소속 레슨 포함)
//! - `PATCH  /levels/{id}` → 급수 부분 업데이트
//! - `DELETE /levels/{id}` → 급수 삭제 (레슨이 남아 있으면 409)
//!
//! 목록 응답은 ListCache를 통해 읽고, 변경이 성공하면 즉시 무효화합니다.
//! 급수가 바뀌면 급수를 품는 레슨 목록도 함께 무효화합니다.

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

/// 급수 변경 시 무효화할 캐시 키: 레슨 목록이 급수를 품고 있습니다.
const INVALIDATES: &[Resource] = &[Resource::Levels, Resource::Lessons];

/// `GET /levels` — 전체 급수 목록을 조회합니다.
pub async fn list_levels(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    if let Some(cached) = state.cache.get(Resource::Levels).await {
        return Ok(Json(cached));
    }

    let levels = db::list_levels(&state.pool).await?;
    let value = serde_json::to_value(&levels)
        .map_err(|e| AppError::Internal(format!("Serialization failed: {}", e)))?;
    state.cache.put(Resource::Levels, value.clone()).await;
    Ok(Json(value))
}

/// `GET /levels/{id}` — 단일 급수를 소속 레슨과 함께 조회합니다.
pub async fn get_level(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HskLevel>, AppError> {
    let level = db::get_level(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(Json(level))
}

/// `POST /levels` — 새 급수를 생성합니다. (인증 필요)
pub async fn create_level(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<CreateLevelRequest>,
) -> Result<(StatusCode, Json<HskLevel>), AppError> {
    let new = validation::validate_new_level(&req)?;
    let level = db::create_level(&state.pool, &new).await?;
    state.cache.invalidate(INVALIDATES).await;
    Ok((StatusCode::CREATED, Json(level)))
}

/// `PATCH /levels/{id}` — 급수를 부분 업데이트합니다. (인증 필요)
pub async fn update_level(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLevelRequest>,
) -> Result<Json<HskLevel>, AppError> {
    let patch = validation::validate_level_patch(&req)?;
    let level = db::update_level(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(level))
}

/// `DELETE /levels/{id}` — 급수를 삭제하고 삭제된 행을 반환합니다. (인증 필요)
pub async fn delete_level(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<HskLevel>, AppError> {
    let level = db::delete_level(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    state.cache.invalidate(INVALIDATES).await;
    Ok(Json(level))
}
