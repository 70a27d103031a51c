use serde::{Deserialize, Serialize};

use crate::models::level::HskLevel;
use crate::services::validation::IntInput;

/// 레슨 콘텐츠 유형. DB에는 TEXT('VOCABULARY' 등)로 저장됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum LessonType {
    Vocabulary,
    Grammar,
    Conversation,
}

/// 콘텐츠 공개 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub level_id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub lesson_type: LessonType,
    pub status: ContentStatus,
    pub is_free: bool,
    /// 급수 내 표시 순서. 정렬 힌트일 뿐 유일성은 요구하지 않습니다.
    pub order_index: i64,
    pub media_url: Option<String>,
    /// 목록/단일 조회 시 함께 실리는 소속 급수
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<HskLevel>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    pub level_id: Option<IntInput>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub lesson_type: Option<LessonType>,
    pub status: Option<ContentStatus>,
    pub is_free: Option<bool>,
    pub order_index: Option<IntInput>,
    pub media_url: Option<String>,
}

/// 부분 업데이트 요청. NULL 허용 컬럼(description, mediaUrl)은 이중 Option:
/// 필드 생략 → 유지, `null` → NULL로 초기화.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonRequest {
    pub level_id: Option<IntInput>,
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(rename = "type")]
    pub lesson_type: Option<LessonType>,
    pub status: Option<ContentStatus>,
    pub is_free: Option<bool>,
    pub order_index: Option<IntInput>,
    #[serde(default)]
    pub media_url: Option<Option<String>>,
}

/// 유효성 검사를 통과한 레슨 생성 데이터.
/// type/status/isFree가 생략되면 원래 스키마의 기본값을 채웁니다.
#[derive(Debug, Clone)]
pub struct NewLesson {
    pub level_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub lesson_type: LessonType,
    pub status: ContentStatus,
    pub is_free: bool,
    pub order_index: i64,
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct LessonPatch {
    pub level_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub lesson_type: Option<LessonType>,
    pub status: Option<ContentStatus>,
    pub is_free: Option<bool>,
    pub order_index: Option<i64>,
    pub media_url: Option<Option<String>>,
}
