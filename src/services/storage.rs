//! # 업로드 파일 저장 서비스
//!
//! 업로드된 이미지/오디오 파일의 디스크 저장을 담당하는 모듈입니다.
//! 저장 계약은 store / fetch / public_url 세 가지뿐이라,
//! 로컬 디스크 대신 오브젝트 스토리지로 바꿔도 호출부는 그대로입니다.
//!
//! 저장 파일명은 `{필드명}-{타임스탬프}-{uuid}{.확장자}` 형태로 새로 만들며,
//! 클라이언트가 보낸 원본 파일명은 절대 그대로 쓰지 않습니다.
//! 확장자만 영숫자로 정제해서 이어 붙입니다.

use std::path::PathBuf;

use tokio::fs;

use crate::error::AppError;

/// 업로드 허용 최대 크기: 5 MiB
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// multipart 본문 전체의 전송 한도. 파일 한도보다 약간 여유를 둬서
/// 경계/헤더 오버헤드 때문에 정상 크기 파일이 잘리지 않게 합니다.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// 원본 파일명에서 확장자만 뽑아 정제합니다.
///
/// 영숫자가 아닌 문자가 섞인 확장자는 버리고, 소문자로 통일합니다.
/// 예: "Photo.PNG" → Some("png"), "archive.tar.gz" → Some("gz"), "noext" → None
fn sanitized_extension(original_name: &str) -> Option<String> {
    let ext = std::path::Path::new(original_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// 충돌 없는 저장 파일명을 생성합니다.
///
/// 같은 초에 같은 이름의 파일이 두 번 올라와도 uuid 접미사 덕분에
/// 서로 다른 파일명이 됩니다.
pub fn unique_filename(field_name: &str, original_name: &str) -> String {
    let timestamp = chrono::Utc::now().timestamp_millis();
    let suffix = uuid::Uuid::now_v7().simple().to_string();
    match sanitized_extension(original_name) {
        Some(ext) => format!("{field_name}-{timestamp}-{suffix}.{ext}"),
        None => format!("{field_name}-{timestamp}-{suffix}"),
    }
}

/// 파일명이 저장 디렉토리 밖을 가리키지 않는지 확인합니다.
fn checked_path(uploads_path: &str, filename: &str) -> Result<PathBuf, AppError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(AppError::BadRequest("Invalid file name".to_string()));
    }
    Ok(PathBuf::from(uploads_path).join(filename))
}

/// 파일 내용을 저장 디렉토리에 기록합니다.
pub async fn store(uploads_path: &str, filename: &str, bytes: &[u8]) -> Result<(), AppError> {
    let path = checked_path(uploads_path, filename)?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(&path, bytes).await?;
    Ok(())
}

/// 저장된 파일을 읽어 반환합니다. 없으면 NotFound.
pub async fn fetch(uploads_path: &str, filename: &str) -> Result<Vec<u8>, AppError> {
    let path = checked_path(uploads_path, filename)?;
    match fs::read(&path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound),
        Err(e) => Err(e.into()),
    }
}

/// 저장 파일명으로 공개 URL을 만듭니다.
pub fn public_url(base_url: &str, filename: &str) -> String {
    format!("{}/uploads/{}", base_url.trim_end_matches('/'), filename)
}

/// 확장자로 Content-Type을 결정합니다. 모르는 확장자는 octet-stream.
pub fn content_type_for(filename: &str) -> &'static str {
    match sanitized_extension(filename).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    }
}
