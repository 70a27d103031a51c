use serde::{Deserialize, Serialize};

use crate::models::lesson::Lesson;
use crate::services::validation::IntInput;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vocabulary {
    pub id: i64,
    pub lesson_id: i64,
    pub hanzi: String,
    pub pinyin: String,
    /// 베트남어 뜻
    pub meaning_vn: String,
    pub audio_url: Option<String>,
    pub stroke_order_svg: Option<String>,
    pub example_hanzi: Option<String>,
    pub example_meaning: Option<String>,
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lesson: Option<Lesson>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVocabularyRequest {
    pub lesson_id: Option<IntInput>,
    pub hanzi: Option<String>,
    pub pinyin: Option<String>,
    pub meaning_vn: Option<String>,
    pub audio_url: Option<String>,
    pub stroke_order_svg: Option<String>,
    pub example_hanzi: Option<String>,
    pub example_meaning: Option<String>,
}

/// 부분 업데이트 요청. NULL 허용 컬럼은 이중 Option:
/// 필드 생략 → 유지, `null` → NULL로 초기화.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVocabularyRequest {
    pub lesson_id: Option<IntInput>,
    pub hanzi: Option<String>,
    pub pinyin: Option<String>,
    pub meaning_vn: Option<String>,
    #[serde(default)]
    pub audio_url: Option<Option<String>>,
    #[serde(default)]
    pub stroke_order_svg: Option<Option<String>>,
    #[serde(default)]
    pub example_hanzi: Option<Option<String>>,
    #[serde(default)]
    pub example_meaning: Option<Option<String>>,
}

#[derive(Debug, Clone)]
pub struct NewVocabulary {
    pub lesson_id: i64,
    pub hanzi: String,
    pub pinyin: String,
    pub meaning_vn: String,
    pub audio_url: Option<String>,
    pub stroke_order_svg: Option<String>,
    pub example_hanzi: Option<String>,
    pub example_meaning: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyPatch {
    pub lesson_id: Option<i64>,
    pub hanzi: Option<String>,
    pub pinyin: Option<String>,
    pub meaning_vn: Option<String>,
    pub audio_url: Option<Option<String>>,
    pub stroke_order_svg: Option<Option<String>>,
    pub example_hanzi: Option<Option<String>>,
    pub example_meaning: Option<Option<String>>,
}
