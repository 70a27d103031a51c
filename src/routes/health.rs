use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — 서버가 살아 있는지 확인하는 헬스체크 엔드포인트입니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
