//! # HSK Studio 백엔드 라이브러리
//!
//! 중국어 학습 콘텐츠(HSK 급수, 레슨, 단어, 회화 대사)를 관리하는
//! REST API 서버의 라이브러리 크레이트입니다.
//!
//! 모듈 구조:
//! - `config`: 환경변수 기반 설정
//! - `error`: 애플리케이션 공통 에러 타입과 HTTP 응답 변환
//! - `models`: 도메인 타입과 요청/응답 DTO
//! - `db`: SQLite 쿼리 함수들 (리소스별 파일)
//! - `routes`: Axum 핸들러와 공유 상태(AppState)
//! - `middleware`: JWT 인증 extractor
//! - `services`: 검증, 목록 캐시, 파일 저장
//!
//! main.rs는 이 라이브러리를 조립해서 서버를 띄우기만 하고,
//! 통합 테스트는 이 크레이트를 직접 가져다 라우터를 만듭니다.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use routes::AppState;
use services::storage::UPLOAD_BODY_LIMIT;

/// 전체 API 라우터를 조립합니다.
///
/// main과 통합 테스트가 같은 라우터를 쓰도록 여기서 한 번만 정의합니다.
pub fn build_router(state: AppState) -> Router {
    // 인증 관련 라우트 (로그인, 내 정보)
    let auth_routes = Router::new()
        .route("/auth/login", post(routes::auth::login))
        .route("/auth/me", get(routes::auth::me));

    // 업로드 라우트만 본문 한도를 따로 둡니다.
    // 파일 한도(5 MiB)에 multipart 경계 오버헤드만큼 여유를 더한 값입니다.
    let upload_routes = Router::new()
        .route("/uploads", post(routes::uploads::upload_file))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .route("/uploads/{filename}", get(routes::uploads::serve_upload));

    Router::new()
        .merge(auth_routes)
        .merge(upload_routes)
        // HSK 급수 CRUD
        .route(
            "/levels",
            get(routes::list_levels).post(routes::create_level),
        )
        .route(
            "/levels/{id}",
            get(routes::get_level)
                .patch(routes::update_level)
                .delete(routes::delete_level),
        )
        // 레슨 CRUD
        .route(
            "/lessons",
            get(routes::list_lessons).post(routes::create_lesson),
        )
        .route(
            "/lessons/{id}",
            get(routes::get_lesson)
                .patch(routes::update_lesson)
                .delete(routes::delete_lesson),
        )
        // 단어 CRUD
        .route(
            "/vocabularies",
            get(routes::list_vocabularies).post(routes::create_vocabulary),
        )
        .route(
            "/vocabularies/{id}",
            get(routes::get_vocabulary)
                .patch(routes::update_vocabulary)
                .delete(routes::delete_vocabulary),
        )
        // 회화 대사 CRUD
        .route(
            "/dialogue-lines",
            get(routes::list_dialogue_lines).post(routes::create_dialogue_line),
        )
        .route(
            "/dialogue-lines/{id}",
            get(routes::get_dialogue_line)
                .patch(routes::update_dialogue_line)
                .delete(routes::delete_dialogue_line),
        )
        // 헬스체크
        .route("/health", get(routes::health_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
