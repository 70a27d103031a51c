//! # 입력 유효성 검사 모듈
//!
//! 리소스별 생성/수정 요청을 검사하는 순수 함수들입니다.
//! 저장소는 일절 건드리지 않으며, 결과는 둘 중 하나입니다:
//! - 타입이 확정된 검증 데이터 (`NewLevel`, `LessonPatch` 등)
//! - 필드 단위 에러 목록 (`AppError::Validation`)
//!
//! 관리자 폼은 숫자 필드를 문자열로 보낼 수 있으므로(`"3"`),
//! 숫자 필드는 `IntInput`으로 받아 여기서 정수로 강제 변환합니다.
//! 변환 실패나 범위 위반은 해당 필드 이름으로 키가 잡힌 에러가 됩니다.
//!
//! 검사 규칙 (원본 클라이언트 스키마와 동일):
//! - `level` ∈ [1, 6]
//! - name/title/hanzi/pinyin/meaning 계열 필드는 비어 있으면 안 됨
//! - `orderIndex` ≥ 1
//! - `levelId`/`lessonId`는 양의 정수 (존재 여부는 DB 외래키가 검사)

use serde::Deserialize;

use crate::error::{AppError, FieldError};
use crate::models::*;

/// 숫자 또는 문자열로 들어오는 정수 입력
///
/// `#[serde(untagged)]`: JSON 값의 형태에 따라 variant가 결정됩니다.
/// `3`은 `Int(3)`, `"3"`은 `Text("3")`이 됩니다.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IntInput {
    Int(i64),
    Text(String),
}

impl IntInput {
    /// 정수로 강제 변환을 시도합니다. 숫자가 아닌 문자열이면 None.
    fn as_i64(&self) -> Option<i64> {
        match self {
            IntInput::Int(n) => Some(*n),
            IntInput::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// 필드 에러를 누적하는 검사 도우미
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    /// 필수 정수 필드. 누락되었거나 숫자로 변환할 수 없으면 에러를 남깁니다.
    fn require_int(
        &mut self,
        field: &'static str,
        value: &Option<IntInput>,
        label: &str,
    ) -> Option<i64> {
        match value {
            None => {
                self.errors
                    .push(FieldError::new(field, format!("{label} is required")));
                None
            }
            Some(v) => match v.as_i64() {
                Some(n) => Some(n),
                None => {
                    self.errors
                        .push(FieldError::new(field, format!("{label} must be a number")));
                    None
                }
            },
        }
    }

    /// 선택 정수 필드. 없으면 그냥 None, 있는데 숫자가 아니면 에러.
    fn optional_int(
        &mut self,
        field: &'static str,
        value: &Option<IntInput>,
        label: &str,
    ) -> Option<i64> {
        match value {
            None => None,
            Some(v) => match v.as_i64() {
                Some(n) => Some(n),
                None => {
                    self.errors
                        .push(FieldError::new(field, format!("{label} must be a number")));
                    None
                }
            },
        }
    }

    /// 값이 [min, max] 범위를 벗어나면 에러를 남깁니다.
    fn check_range(
        &mut self,
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
        label: &str,
    ) -> Option<i64> {
        if value < min {
            self.errors
                .push(FieldError::new(field, format!("{label} must be at least {min}")));
            None
        } else if value > max {
            self.errors
                .push(FieldError::new(field, format!("{label} must be at most {max}")));
            None
        } else {
            Some(value)
        }
    }

    /// 값이 min 미만이면 에러를 남깁니다.
    fn check_min(
        &mut self,
        field: &'static str,
        value: i64,
        min: i64,
        label: &str,
    ) -> Option<i64> {
        if value < min {
            self.errors
                .push(FieldError::new(field, format!("{label} must be at least {min}")));
            None
        } else {
            Some(value)
        }
    }

    /// 외래키 id 필드. 1 이상의 정수만 허용합니다.
    fn check_positive(
        &mut self,
        field: &'static str,
        value: i64,
        label: &str,
    ) -> Option<i64> {
        if value < 1 {
            self.errors.push(FieldError::new(
                field,
                format!("{label} must be a positive integer"),
            ));
            None
        } else {
            Some(value)
        }
    }

    /// 필수 텍스트 필드. 누락되었거나 공백뿐이면 에러를 남깁니다.
    fn require_text(
        &mut self,
        field: &'static str,
        value: &Option<String>,
        label: &str,
    ) -> Option<String> {
        match value {
            Some(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => {
                self.errors
                    .push(FieldError::new(field, format!("{label} is required")));
                None
            }
        }
    }

    /// PATCH에서 쓰는 텍스트 필드: 있을 때만 비어 있지 않은지 검사합니다.
    fn optional_text(
        &mut self,
        field: &'static str,
        value: &Option<String>,
        label: &str,
    ) -> Option<String> {
        match value {
            None => None,
            Some(s) if !s.trim().is_empty() => Some(s.clone()),
            Some(_) => {
                self.errors
                    .push(FieldError::new(field, format!("{label} must not be empty")));
                None
            }
        }
    }

    fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

// ── HskLevel ────────────────────────────────────────────────────────────

pub fn validate_new_level(req: &CreateLevelRequest) -> Result<NewLevel, AppError> {
    let mut c = Checker::default();

    let level = match c.require_int("level", &req.level, "Level") {
        Some(n) => c.check_range("level", n, 1, 6, "Level"),
        None => None,
    };
    let name = c.require_text("name", &req.name, "Name");
    let description = req.description.clone();

    c.finish()?;
    match (level, name) {
        (Some(level), Some(name)) => Ok(NewLevel {
            level,
            name,
            description,
        }),
        _ => Err(AppError::Internal("level validation left no data".to_string())),
    }
}

pub fn validate_level_patch(req: &UpdateLevelRequest) -> Result<LevelPatch, AppError> {
    let mut c = Checker::default();

    let level = match c.optional_int("level", &req.level, "Level") {
        Some(n) => c.check_range("level", n, 1, 6, "Level"),
        None => None,
    };
    let name = c.optional_text("name", &req.name, "Name");
    let description = req.description.clone();

    c.finish()?;
    Ok(LevelPatch {
        level,
        name,
        description,
    })
}

// ── Lesson ──────────────────────────────────────────────────────────────

pub fn validate_new_lesson(req: &CreateLessonRequest) -> Result<NewLesson, AppError> {
    let mut c = Checker::default();

    let level_id = match c.require_int("levelId", &req.level_id, "Level") {
        Some(n) => c.check_positive("levelId", n, "Level"),
        None => None,
    };
    let title = c.require_text("title", &req.title, "Title");
    let order_index = match c.require_int("orderIndex", &req.order_index, "Order index") {
        Some(n) => c.check_min("orderIndex", n, 1, "Order index"),
        None => None,
    };

    c.finish()?;
    match (level_id, title, order_index) {
        (Some(level_id), Some(title), Some(order_index)) => Ok(NewLesson {
            level_id,
            title,
            description: req.description.clone(),
            lesson_type: req.lesson_type.unwrap_or(LessonType::Vocabulary),
            status: req.status.unwrap_or(ContentStatus::Draft),
            is_free: req.is_free.unwrap_or(false),
            order_index,
            media_url: req.media_url.clone(),
        }),
        _ => Err(AppError::Internal("lesson validation left no data".to_string())),
    }
}

pub fn validate_lesson_patch(req: &UpdateLessonRequest) -> Result<LessonPatch, AppError> {
    let mut c = Checker::default();

    let level_id = match c.optional_int("levelId", &req.level_id, "Level") {
        Some(n) => c.check_positive("levelId", n, "Level"),
        None => None,
    };
    let title = c.optional_text("title", &req.title, "Title");
    let order_index = match c.optional_int("orderIndex", &req.order_index, "Order index") {
        Some(n) => c.check_min("orderIndex", n, 1, "Order index"),
        None => None,
    };

    c.finish()?;
    Ok(LessonPatch {
        level_id,
        title,
        description: req.description.clone(),
        lesson_type: req.lesson_type,
        status: req.status,
        is_free: req.is_free,
        order_index,
        media_url: req.media_url.clone(),
    })
}

// ── Vocabulary ──────────────────────────────────────────────────────────

pub fn validate_new_vocabulary(req: &CreateVocabularyRequest) -> Result<NewVocabulary, AppError> {
    let mut c = Checker::default();

    let lesson_id = match c.require_int("lessonId", &req.lesson_id, "Lesson") {
        Some(n) => c.check_positive("lessonId", n, "Lesson"),
        None => None,
    };
    let hanzi = c.require_text("hanzi", &req.hanzi, "Hanzi");
    let pinyin = c.require_text("pinyin", &req.pinyin, "Pinyin");
    let meaning_vn = c.require_text("meaningVn", &req.meaning_vn, "Meaning (VN)");

    c.finish()?;
    match (lesson_id, hanzi, pinyin, meaning_vn) {
        (Some(lesson_id), Some(hanzi), Some(pinyin), Some(meaning_vn)) => Ok(NewVocabulary {
            lesson_id,
            hanzi,
            pinyin,
            meaning_vn,
            audio_url: req.audio_url.clone(),
            stroke_order_svg: req.stroke_order_svg.clone(),
            example_hanzi: req.example_hanzi.clone(),
            example_meaning: req.example_meaning.clone(),
        }),
        _ => Err(AppError::Internal(
            "vocabulary validation left no data".to_string(),
        )),
    }
}

pub fn validate_vocabulary_patch(
    req: &UpdateVocabularyRequest,
) -> Result<VocabularyPatch, AppError> {
    let mut c = Checker::default();

    let lesson_id = match c.optional_int("lessonId", &req.lesson_id, "Lesson") {
        Some(n) => c.check_positive("lessonId", n, "Lesson"),
        None => None,
    };
    let hanzi = c.optional_text("hanzi", &req.hanzi, "Hanzi");
    let pinyin = c.optional_text("pinyin", &req.pinyin, "Pinyin");
    let meaning_vn = c.optional_text("meaningVn", &req.meaning_vn, "Meaning (VN)");

    c.finish()?;
    Ok(VocabularyPatch {
        lesson_id,
        hanzi,
        pinyin,
        meaning_vn,
        audio_url: req.audio_url.clone(),
        stroke_order_svg: req.stroke_order_svg.clone(),
        example_hanzi: req.example_hanzi.clone(),
        example_meaning: req.example_meaning.clone(),
    })
}

// ── DialogueLine ────────────────────────────────────────────────────────

pub fn validate_new_dialogue_line(
    req: &CreateDialogueLineRequest,
) -> Result<NewDialogueLine, AppError> {
    let mut c = Checker::default();

    let lesson_id = match c.require_int("lessonId", &req.lesson_id, "Lesson") {
        Some(n) => c.check_positive("lessonId", n, "Lesson"),
        None => None,
    };
    let role_name = c.require_text("roleName", &req.role_name, "Role name");
    let content_hanzi = c.require_text("contentHanzi", &req.content_hanzi, "Content (Hanzi)");
    let content_pinyin = c.require_text("contentPinyin", &req.content_pinyin, "Content (Pinyin)");
    let meaning_vn = c.require_text("meaningVn", &req.meaning_vn, "Meaning (VN)");
    let order_index = match c.require_int("orderIndex", &req.order_index, "Order index") {
        Some(n) => c.check_min("orderIndex", n, 1, "Order index"),
        None => None,
    };

    c.finish()?;
    match (lesson_id, role_name, content_hanzi, content_pinyin, meaning_vn, order_index) {
        (
            Some(lesson_id),
            Some(role_name),
            Some(content_hanzi),
            Some(content_pinyin),
            Some(meaning_vn),
            Some(order_index),
        ) => Ok(NewDialogueLine {
            lesson_id,
            role_name,
            avatar_url: req.avatar_url.clone(),
            content_hanzi,
            content_pinyin,
            meaning_vn,
            audio_url: req.audio_url.clone(),
            order_index,
        }),
        _ => Err(AppError::Internal(
            "dialogue line validation left no data".to_string(),
        )),
    }
}

pub fn validate_dialogue_line_patch(
    req: &UpdateDialogueLineRequest,
) -> Result<DialogueLinePatch, AppError> {
    let mut c = Checker::default();

    let lesson_id = match c.optional_int("lessonId", &req.lesson_id, "Lesson") {
        Some(n) => c.check_positive("lessonId", n, "Lesson"),
        None => None,
    };
    let role_name = c.optional_text("roleName", &req.role_name, "Role name");
    let content_hanzi = c.optional_text("contentHanzi", &req.content_hanzi, "Content (Hanzi)");
    let content_pinyin = c.optional_text("contentPinyin", &req.content_pinyin, "Content (Pinyin)");
    let meaning_vn = c.optional_text("meaningVn", &req.meaning_vn, "Meaning (VN)");
    let order_index = match c.optional_int("orderIndex", &req.order_index, "Order index") {
        Some(n) => c.check_min("orderIndex", n, 1, "Order index"),
        None => None,
    };

    c.finish()?;
    Ok(DialogueLinePatch {
        lesson_id,
        role_name,
        avatar_url: req.avatar_url.clone(),
        content_hanzi,
        content_pinyin,
        meaning_vn,
        audio_url: req.audio_url.clone(),
        order_index,
    })
}
