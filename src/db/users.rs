use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::User;

const USER_COLUMNS: &str = "id, email, password_hash, full_name, role, created_at, updated_at";

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    full_name: &str,
    role: &str,
) -> Result<User, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (email, password_hash, full_name, role)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .bind(role)
    .execute(pool)
    .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}
