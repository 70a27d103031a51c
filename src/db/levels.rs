use sqlx::SqlitePool;

use crate::db::{is_fk_violation, is_unique_violation};
use crate::error::AppError;
use crate::models::{HskLevel, Lesson, LevelPatch, NewLevel};

const LEVEL_COLUMNS: &str = "id, level, name, description, created_at, updated_at";

/// 전체 급수를 `level` 오름차순으로 조회합니다. 소속 레슨은 싣지 않습니다.
pub async fn list_levels(pool: &SqlitePool) -> Result<Vec<HskLevel>, AppError> {
    let levels = sqlx::query_as::<_, HskLevel>(&format!(
        "SELECT {LEVEL_COLUMNS} FROM hsk_levels ORDER BY level ASC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(levels)
}

/// 단일 급수를 조회합니다. 소속 레슨 목록을 `orderIndex` 순으로 함께 싣습니다.
pub async fn get_level(pool: &SqlitePool, id: i64) -> Result<Option<HskLevel>, AppError> {
    let Some(mut level) = find_level_row(pool, id).await? else {
        return Ok(None);
    };

    let lessons = sqlx::query_as::<_, Lesson>(
        r#"
        SELECT id, level_id, title, description, type, status, is_free,
               order_index, media_url, created_at, updated_at
        FROM lessons
        WHERE level_id = ?
        ORDER BY order_index ASC
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    level.lessons = Some(lessons);
    Ok(Some(level))
}

/// 레슨을 싣지 않은 급수 행 하나를 조회합니다.
pub async fn find_level_row(pool: &SqlitePool, id: i64) -> Result<Option<HskLevel>, AppError> {
    let level = sqlx::query_as::<_, HskLevel>(&format!(
        "SELECT {LEVEL_COLUMNS} FROM hsk_levels WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(level)
}

/// 새 급수를 생성합니다. `level` 값이 중복되면 409로 매핑되는 에러를 반환합니다.
pub async fn create_level(pool: &SqlitePool, new: &NewLevel) -> Result<HskLevel, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO hsk_levels (level, name, description)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(new.level)
    .bind(&new.name)
    .bind(&new.description)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict(format!("HSK level {} already exists", new.level))
        } else {
            e.into()
        }
    })?;

    let id = result.last_insert_rowid();
    find_level_row(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created level".to_string()))
}

/// 급수를 부분 업데이트합니다. 요청에 담긴 필드만 반영합니다.
pub async fn update_level(
    pool: &SqlitePool,
    id: i64,
    patch: &LevelPatch,
) -> Result<Option<HskLevel>, AppError> {
    if find_level_row(pool, id).await?.is_none() {
        return Ok(None);
    }

    let mut qb: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
        "UPDATE hsk_levels SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );
    if let Some(level) = patch.level {
        qb.push(", level = ").push_bind(level);
    }
    if let Some(name) = &patch.name {
        qb.push(", name = ").push_bind(name);
    }
    if let Some(description) = &patch.description {
        // 바깥 Some은 "이 필드를 바꾼다", 안쪽 None은 NULL로 초기화.
        qb.push(", description = ").push_bind(description.clone());
    }
    qb.push(" WHERE id = ").push_bind(id);

    qb.build().execute(pool).await.map_err(|e| {
        if is_unique_violation(&e) {
            AppError::Conflict("Another HSK level already uses that level number".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    find_level_row(pool, id).await
}

/// 급수를 삭제하고 삭제된 행을 반환합니다.
/// 소속 레슨이 남아 있으면 RESTRICT 외래키에 걸려 409로 매핑됩니다.
pub async fn delete_level(pool: &SqlitePool, id: i64) -> Result<Option<HskLevel>, AppError> {
    let Some(level) = find_level_row(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM hsk_levels WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_fk_violation(&e) {
                AppError::Conflict("Cannot delete a level that still has lessons".to_string())
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Some(level))
}
