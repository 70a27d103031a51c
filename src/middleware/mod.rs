//! # 미들웨어 모듈
//!
//! - `auth`: JWT 베어러 토큰 발급/검증과 `AuthUser` 추출기(extractor)

pub mod auth;
