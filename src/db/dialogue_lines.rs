use std::collections::{HashMap, HashSet};

use sqlx::SqlitePool;

use crate::db::is_fk_violation;
use crate::error::AppError;
use crate::models::{DialogueLine, DialogueLinePatch, Lesson, NewDialogueLine};

const DIALOGUE_LINE_COLUMNS: &str = "id, lesson_id, role_name, avatar_url, content_hanzi, \
                                     content_pinyin, meaning_vn, audio_url, order_index, \
                                     created_at, updated_at";

/// 전체 회화 대사를 `orderIndex` 오름차순으로 조회합니다. 소속 레슨을 함께 싣습니다.
pub async fn list_dialogue_lines(pool: &SqlitePool) -> Result<Vec<DialogueLine>, AppError> {
    let mut lines = sqlx::query_as::<_, DialogueLine>(&format!(
        "SELECT {DIALOGUE_LINE_COLUMNS} FROM dialogue_lines ORDER BY order_index ASC"
    ))
    .fetch_all(pool)
    .await?;

    attach_lessons(pool, &mut lines).await?;
    Ok(lines)
}

/// 단일 회화 대사를 조회합니다. 소속 레슨을 함께 싣습니다.
pub async fn get_dialogue_line(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DialogueLine>, AppError> {
    let Some(line) = find_dialogue_line_row(pool, id).await? else {
        return Ok(None);
    };

    let mut lines = vec![line];
    attach_lessons(pool, &mut lines).await?;
    Ok(lines.pop())
}

/// 레슨을 싣지 않은 회화 대사 행 하나를 조회합니다.
pub async fn find_dialogue_line_row(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DialogueLine>, AppError> {
    let line = sqlx::query_as::<_, DialogueLine>(&format!(
        "SELECT {DIALOGUE_LINE_COLUMNS} FROM dialogue_lines WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(line)
}

async fn attach_lessons(pool: &SqlitePool, lines: &mut [DialogueLine]) -> Result<(), AppError> {
    if lines.is_empty() {
        return Ok(());
    }

    let wanted: HashSet<i64> = lines.iter().map(|l| l.lesson_id).collect();
    let mut qb: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
        "SELECT id, level_id, title, description, type, status, is_free, \
         order_index, media_url, created_at, updated_at FROM lessons WHERE id IN (",
    );
    let mut ids = qb.separated(", ");
    for id in &wanted {
        ids.push_bind(*id);
    }
    ids.push_unseparated(")");

    let lessons: Vec<Lesson> = qb.build_query_as().fetch_all(pool).await?;
    let by_id: HashMap<i64, Lesson> = lessons.into_iter().map(|l| (l.id, l)).collect();

    for line in lines.iter_mut() {
        line.lesson = by_id.get(&line.lesson_id).cloned();
    }
    Ok(())
}

/// 새 회화 대사를 생성합니다.
/// 존재하지 않는 레슨을 가리키면 외래키 위반 → 400으로 매핑됩니다.
pub async fn create_dialogue_line(
    pool: &SqlitePool,
    new: &NewDialogueLine,
) -> Result<DialogueLine, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO dialogue_lines (lesson_id, role_name, avatar_url, content_hanzi,
                                    content_pinyin, meaning_vn, audio_url, order_index)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.lesson_id)
    .bind(&new.role_name)
    .bind(&new.avatar_url)
    .bind(&new.content_hanzi)
    .bind(&new.content_pinyin)
    .bind(&new.meaning_vn)
    .bind(&new.audio_url)
    .bind(new.order_index)
    .execute(pool)
    .await
    .map_err(|e| {
        if is_fk_violation(&e) {
            AppError::BadRequest("lessonId does not reference an existing lesson".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    let id = result.last_insert_rowid();
    find_dialogue_line_row(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created dialogue line".to_string()))
}

/// 회화 대사를 부분 업데이트합니다.
pub async fn update_dialogue_line(
    pool: &SqlitePool,
    id: i64,
    patch: &DialogueLinePatch,
) -> Result<Option<DialogueLine>, AppError> {
    if find_dialogue_line_row(pool, id).await?.is_none() {
        return Ok(None);
    }

    let mut qb: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
        "UPDATE dialogue_lines SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );
    if let Some(lesson_id) = patch.lesson_id {
        qb.push(", lesson_id = ").push_bind(lesson_id);
    }
    if let Some(role_name) = &patch.role_name {
        qb.push(", role_name = ").push_bind(role_name);
    }
    // NULL 허용 필드: 바깥 Some은 "이 필드를 바꾼다", 안쪽 None은 NULL로 초기화.
    if let Some(avatar_url) = &patch.avatar_url {
        qb.push(", avatar_url = ").push_bind(avatar_url.clone());
    }
    if let Some(content_hanzi) = &patch.content_hanzi {
        qb.push(", content_hanzi = ").push_bind(content_hanzi);
    }
    if let Some(content_pinyin) = &patch.content_pinyin {
        qb.push(", content_pinyin = ").push_bind(content_pinyin);
    }
    if let Some(meaning_vn) = &patch.meaning_vn {
        qb.push(", meaning_vn = ").push_bind(meaning_vn);
    }
    if let Some(audio_url) = &patch.audio_url {
        qb.push(", audio_url = ").push_bind(audio_url.clone());
    }
    if let Some(order_index) = patch.order_index {
        qb.push(", order_index = ").push_bind(order_index);
    }
    qb.push(" WHERE id = ").push_bind(id);

    qb.build().execute(pool).await.map_err(|e| {
        if is_fk_violation(&e) {
            AppError::BadRequest("lessonId does not reference an existing lesson".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    find_dialogue_line_row(pool, id).await
}

/// 회화 대사를 삭제하고 삭제된 행을 반환합니다.
pub async fn delete_dialogue_line(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<DialogueLine>, AppError> {
    let Some(line) = find_dialogue_line_row(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM dialogue_lines WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(Some(line))
}
