use serde::{Deserialize, Serialize};

use crate::models::lesson::Lesson;
use crate::services::validation::IntInput;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub id: i64,
    pub lesson_id: i64,
    /// 대화 역할 이름 (예: "A", "점원")
    pub role_name: String,
    pub avatar_url: Option<String>,
    pub content_hanzi: String,
    pub content_pinyin: String,
    pub meaning_vn: String,
    pub audio_url: Option<String>,
    /// 레슨 내 대사 순서
    pub order_index: i64,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson: Option<Lesson>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDialogueLineRequest {
    pub lesson_id: Option<IntInput>,
    pub role_name: Option<String>,
    pub avatar_url: Option<String>,
    pub content_hanzi: Option<String>,
    pub content_pinyin: Option<String>,
    pub meaning_vn: Option<String>,
    pub audio_url: Option<String>,
    pub order_index: Option<IntInput>,
}

/// 부분 업데이트 요청. NULL 허용 컬럼(avatarUrl, audioUrl)은 이중 Option:
/// 필드 생략 → 유지, `null` → NULL로 초기화.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDialogueLineRequest {
    pub lesson_id: Option<IntInput>,
    pub role_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<Option<String>>,
    pub content_hanzi: Option<String>,
    pub content_pinyin: Option<String>,
    pub meaning_vn: Option<String>,
    #[serde(default)]
    pub audio_url: Option<Option<String>>,
    pub order_index: Option<IntInput>,
}

#[derive(Debug, Clone)]
pub struct NewDialogueLine {
    pub lesson_id: i64,
    pub role_name: String,
    pub avatar_url: Option<String>,
    pub content_hanzi: String,
    pub content_pinyin: String,
    pub meaning_vn: String,
    pub audio_url: Option<String>,
    pub order_index: i64,
}

#[derive(Debug, Clone, Default)]
pub struct DialogueLinePatch {
    pub lesson_id: Option<i64>,
    pub role_name: Option<String>,
    pub avatar_url: Option<Option<String>>,
    pub content_hanzi: Option<String>,
    pub content_pinyin: Option<String>,
    pub meaning_vn: Option<String>,
    pub audio_url: Option<Option<String>>,
    pub order_index: Option<i64>,
}
