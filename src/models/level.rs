use serde::{Deserialize, Serialize};

use crate::models::lesson::Lesson;
use crate::services::validation::IntInput;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HskLevel {
    pub id: i64,
    pub level: i64,
    pub name: String,
    pub description: Option<String>,
    /// 단일 조회에서만 채워지는 소속 레슨 목록 (목록 조회에서는 생략)
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lessons: Option<Vec<Lesson>>,
    pub created_at: String,
    pub updated_at: String,
}

/// `POST /levels` 요청 본문. 숫자 필드는 폼에서 문자열로 올 수 있어
/// `IntInput`으로 받은 뒤 유효성 검사 단계에서 정수로 강제 변환합니다.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLevelRequest {
    pub level: Option<IntInput>,
    pub name: Option<String>,
    pub description: Option<String>,
}

/// `PATCH /levels/{id}` 요청 본문 (부분 업데이트: 생략한 필드는 변경 안 함)
///
/// NULL 허용 컬럼은 이중 Option으로 받습니다:
/// 필드 생략 → `None`(유지), `null` → `Some(None)`(NULL로 초기화).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLevelRequest {
    pub level: Option<IntInput>,
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
}

/// 유효성 검사를 통과한 급수 생성 데이터
#[derive(Debug, Clone)]
pub struct NewLevel {
    pub level: i64,
    pub name: String,
    pub description: Option<String>,
}

/// 유효성 검사를 통과한 급수 수정 데이터
#[derive(Debug, Clone, Default)]
pub struct LevelPatch {
    pub level: Option<i64>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}
