//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `level`: HSK 급수(HskLevel) 관련 구조체
//! - `lesson`: 레슨(Lesson)과 타입/상태 열거형
//! - `vocabulary`: 단어(Vocabulary) 관련 구조체
//! - `dialogue_line`: 회화 대사(DialogueLine) 관련 구조체
//! - `user`: 사용자(User) 관련 구조체
//!
//! API의 JSON 필드는 원래 관리자 클라이언트가 쓰는 camelCase이고,
//! DB 컬럼과 Rust 필드는 snake_case입니다. 변환은 serde가 담당합니다.

pub mod dialogue_line;
pub mod lesson;
pub mod level;
pub mod user;
pub mod vocabulary;

pub use dialogue_line::*;
pub use lesson::*;
pub use level::*;
pub use user::*;
pub use vocabulary::*;
