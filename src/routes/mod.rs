//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `auth`: 로그인, 내 정보 조회
//! - `levels`: HSK 급수 CRUD 핸들러
//! - `lessons`: 레슨 CRUD 핸들러
//! - `vocabularies`: 단어 CRUD 핸들러
//! - `dialogue_lines`: 회화 대사 CRUD 핸들러
//! - `uploads`: 파일 업로드와 업로드 파일 서빙
//! - `health`: 서버 상태 확인 (헬스체크)

use sqlx::SqlitePool;

use crate::services::cache::ListCache;

pub mod auth;
pub mod dialogue_lines;
pub mod health;
pub mod lessons;
pub mod levels;
pub mod uploads;
pub mod vocabularies;

pub use dialogue_lines::*;
pub use health::*;
pub use lessons::*;
pub use levels::*;
pub use uploads::*;
pub use vocabularies::*;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// SqlitePool과 ListCache는 내부적으로 Arc를 쓰므로 clone해도
/// 같은 풀/캐시를 가리킵니다.
#[derive(Clone)]
pub struct AppState {
    /// SQLite 연결 풀
    pub pool: SqlitePool,
    /// 업로드 파일 저장 디렉토리 경로
    pub uploads_path: String,
    /// 업로드 응답 URL의 베이스 주소
    pub public_base_url: String,
    /// JWT 토큰 서명용 비밀키
    pub jwt_secret: String,
    /// 리소스별 목록 응답 캐시
    pub cache: ListCache,
}
