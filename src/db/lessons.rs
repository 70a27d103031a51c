use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::db::{is_fk_violation, is_unique_violation};
use crate::error::AppError;
use crate::models::{HskLevel, Lesson, LessonPatch, NewLesson};

const LESSON_COLUMNS: &str = "id, level_id, title, description, type, status, is_free, \
                              order_index, media_url, created_at, updated_at";

/// 전체 레슨을 `orderIndex` 오름차순으로 조회합니다. 소속 급수를 함께 싣습니다.
pub async fn list_lessons(pool: &SqlitePool) -> Result<Vec<Lesson>, AppError> {
    let mut lessons = sqlx::query_as::<_, Lesson>(&format!(
        "SELECT {LESSON_COLUMNS} FROM lessons ORDER BY order_index ASC"
    ))
    .fetch_all(pool)
    .await?;

    attach_levels(pool, &mut lessons).await?;
    Ok(lessons)
}

/// 단일 레슨을 조회합니다. 소속 급수를 함께 싣습니다.
pub async fn get_lesson(pool: &SqlitePool, id: i64) -> Result<Option<Lesson>, AppError> {
    let Some(lesson) = find_lesson_row(pool, id).await? else {
        return Ok(None);
    };

    let mut lessons = vec![lesson];
    attach_levels(pool, &mut lessons).await?;
    Ok(lessons.pop())
}

/// 급수를 싣지 않은 레슨 행 하나를 조회합니다.
pub async fn find_lesson_row(pool: &SqlitePool, id: i64) -> Result<Option<Lesson>, AppError> {
    let lesson = sqlx::query_as::<_, Lesson>(&format!(
        "SELECT {LESSON_COLUMNS} FROM lessons WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(lesson)
}

/// 급수 테이블을 한 번만 읽어 각 레슨에 소속 급수를 붙입니다.
/// 급수는 많아야 6개라 메모리 조인으로 충분합니다.
async fn attach_levels(pool: &SqlitePool, lessons: &mut [Lesson]) -> Result<(), AppError> {
    if lessons.is_empty() {
        return Ok(());
    }

    let levels = sqlx::query_as::<_, HskLevel>(
        "SELECT id, level, name, description, created_at, updated_at FROM hsk_levels",
    )
    .fetch_all(pool)
    .await?;
    let by_id: HashMap<i64, HskLevel> = levels.into_iter().map(|l| (l.id, l)).collect();

    for lesson in lessons.iter_mut() {
        lesson.level = by_id.get(&lesson.level_id).cloned();
    }
    Ok(())
}

/// 새 레슨을 생성합니다.
/// 존재하지 않는 급수를 가리키면 외래키 위반 → 400으로 매핑됩니다.
pub async fn create_lesson(pool: &SqlitePool, new: &NewLesson) -> Result<Lesson, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO lessons (level_id, title, description, type, status, is_free,
                             order_index, media_url)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.level_id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.lesson_type)
    .bind(new.status)
    .bind(new.is_free)
    .bind(new.order_index)
    .bind(&new.media_url)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_fk_violation(&e) {
            AppError::BadRequest("levelId does not reference an existing HSK level".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    let id = result.last_insert_rowid();
    find_lesson_row(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created lesson".to_string()))
}

/// 레슨을 부분 업데이트합니다.
pub async fn update_lesson(
    pool: &SqlitePool,
    id: i64,
    patch: &LessonPatch,
) -> Result<Option<Lesson>, AppError> {
    if find_lesson_row(pool, id).await?.is_none() {
        return Ok(None);
    }

    let mut qb: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
        "UPDATE lessons SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );
    if let Some(level_id) = patch.level_id {
        qb.push(", level_id = ").push_bind(level_id);
    }
    if let Some(title) = &patch.title {
        qb.push(", title = ").push_bind(title);
    }
    if let Some(description) = &patch.description {
        // 바깥 Some은 "이 필드를 바꾼다", 안쪽 None은 NULL로 초기화.
        qb.push(", description = ").push_bind(description.clone());
    }
    if let Some(lesson_type) = patch.lesson_type {
        qb.push(", type = ").push_bind(lesson_type);
    }
    if let Some(status) = patch.status {
        qb.push(", status = ").push_bind(status);
    }
    if let Some(is_free) = patch.is_free {
        qb.push(", is_free = ").push_bind(is_free);
    }
    if let Some(order_index) = patch.order_index {
        qb.push(", order_index = ").push_bind(order_index);
    }
    if let Some(media_url) = &patch.media_url {
        qb.push(", media_url = ").push_bind(media_url.clone());
    }
    qb.push(" WHERE id = ").push_bind(id);

    qb.build().execute(pool).await.map_err(|e| {
        if is_fk_violation(&e) {
            AppError::BadRequest("levelId does not reference an existing HSK level".to_string())
        } else if is_unique_violation(&e) {
            AppError::Conflict("Lesson update violates a unique constraint".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    find_lesson_row(pool, id).await
}

/// 레슨을 삭제하고 삭제된 행을 반환합니다.
/// 단어나 회화 대사가 남아 있으면 409로 매핑됩니다.
pub async fn delete_lesson(pool: &SqlitePool, id: i64) -> Result<Option<Lesson>, AppError> {
    let Some(lesson) = find_lesson_row(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM lessons WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| {
            if is_fk_violation(&e) {
                AppError::Conflict(
                    "Cannot delete a lesson that still has vocabulary or dialogue lines"
                        .to_string(),
                )
            } else {
                AppError::from(e)
            }
        })?;

    Ok(Some(lesson))
}
