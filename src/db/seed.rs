//! # 부팅 시드
//!
//! 서버가 부팅할 때 한 번 실행되어, API를 쓰기 위해 꼭 필요한 데이터를
//! 멱등하게(idempotent) 보장합니다:
//! - 관리자 계정 (없으면 생성)
//! - HSK 1~6 기본 급수 행 (이미 있으면 건드리지 않음)

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use sqlx::SqlitePool;

use crate::db::users;
use crate::error::AppError;

/// 관리자 계정이 없으면 생성합니다. 이미 있으면 아무것도 하지 않습니다.
pub async fn ensure_admin_user(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    if users::find_by_email(pool, email).await?.is_some() {
        return Ok(());
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    users::create_user(pool, email, &password_hash, "Admin User", "ADMIN").await?;
    tracing::info!("Seeded admin user {}", email);
    Ok(())
}

/// HSK 1~6 급수 행을 보장합니다. `level` 유니크 키 기준으로 멱등합니다.
pub async fn ensure_default_levels(pool: &SqlitePool) -> Result<(), AppError> {
    let defaults = [
        (1, "HSK 1", "Beginner"),
        (2, "HSK 2", "Elementary"),
        (3, "HSK 3", "Intermediate"),
        (4, "HSK 4", "Upper Intermediate"),
        (5, "HSK 5", "Advanced"),
        (6, "HSK 6", "Proficiency"),
    ];

    for (level, name, description) in defaults {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO hsk_levels (level, name, description)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(level)
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    }

    Ok(())
}
