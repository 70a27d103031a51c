//! # 서비스 모듈
//!
//! 라우트 핸들러가 쓰는 도메인 로직을 모아둔 모듈입니다.
//! - `validation`: 리소스별 입력 유효성 검사 (순수 함수)
//! - `storage`: 업로드 파일의 파일명 생성과 디스크 저장/조회
//! - `cache`: 리소스 타입을 키로 하는 목록 응답 캐시

pub mod cache;
pub mod storage;
pub mod validation;
