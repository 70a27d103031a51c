//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈의 함수를 호출하여 DB 작업을 수행합니다.
//!
//! 각 하위 모듈:
//! - `levels`: HSK 급수 CRUD 쿼리
//! - `lessons`: 레슨 CRUD 쿼리
//! - `vocabularies`: 단어 CRUD 쿼리
//! - `dialogue_lines`: 회화 대사 CRUD 쿼리
//! - `users`: 사용자 조회/생성 쿼리
//! - `seed`: 부팅 시 관리자 계정과 기본 급수를 보장하는 시드 로직
//!
//! 제약 조건 위반은 여기서 에러 분류(taxonomy)로 매핑됩니다:
//! 삽입/수정 시 외래키 위반 → 400, 삭제 시 외래키 위반 → 409, 유니크 위반 → 409.

pub mod dialogue_lines;
pub mod lessons;
pub mod levels;
pub mod seed;
pub mod users;
pub mod vocabularies;

pub use dialogue_lines::*;
pub use lessons::*;
pub use levels::*;
pub use vocabularies::*;

/// sqlx 에러가 외래키 제약 위반인지 확인합니다.
pub(crate) fn is_fk_violation(e: &sqlx::Error) -> bool {
    matches!(
        e.as_database_error().map(|db| db.kind()),
        Some(sqlx::error::ErrorKind::ForeignKeyViolation)
    )
}

/// sqlx 에러가 유니크 제약 위반인지 확인합니다.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e.as_database_error().map(|db| db.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}
