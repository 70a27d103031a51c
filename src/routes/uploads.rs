//! # 업로드 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST /uploads`            → multipart `file` 필드를 저장하고 공개 URL 반환
//! - `GET  /uploads/{filename}` → 저장된 파일 서빙
//!
//! 업로드는 인증이 필요하고, 서빙은 공개입니다.
//! 파일 크기는 5 MiB까지 허용하며 넘으면 413을 반환합니다.

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    routes::AppState,
    services::storage,
};

/// multipart 파싱 오류를 변환합니다. 본문 한도 초과는 413, 나머지는 400.
fn map_multipart_err(e: axum::extract::multipart::MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(format!("Invalid multipart body: {}", e))
    }
}

/// `POST /uploads` — `file` 필드의 파일을 저장하고 URL을 반환합니다. (인증 필요)
pub async fn upload_file(
    State(state): State<AppState>,
    _auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_err)? {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("").to_string();
        let data = field.bytes().await.map_err(map_multipart_err)?;

        if data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if data.len() > storage::MAX_UPLOAD_BYTES {
            return Err(AppError::PayloadTooLarge);
        }

        let filename = storage::unique_filename("file", &original_name);
        storage::store(&state.uploads_path, &filename, &data).await?;

        let url = storage::public_url(&state.public_base_url, &filename);
        tracing::info!(filename = %filename, size = data.len(), "file uploaded");

        return Ok((StatusCode::CREATED, Json(json!({ "url": url }))));
    }

    Err(AppError::BadRequest("No file field in request".to_string()))
}

/// `GET /uploads/{filename}` — 저장된 파일을 Content-Type과 함께 반환합니다.
pub async fn serve_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<([(header::HeaderName, &'static str); 1], Vec<u8>), AppError> {
    let bytes = storage::fetch(&state.uploads_path, &filename).await?;
    let content_type = storage::content_type_for(&filename);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
