use std::collections::{HashMap, HashSet};

use sqlx::SqlitePool;

use crate::db::is_fk_violation;
use crate::error::AppError;
use crate::models::{Lesson, NewVocabulary, Vocabulary, VocabularyPatch};

const VOCABULARY_COLUMNS: &str = "id, lesson_id, hanzi, pinyin, meaning_vn, audio_url, \
                                  stroke_order_svg, example_hanzi, example_meaning, \
                                  created_at, updated_at";

/// 전체 단어를 삽입 순서(id 오름차순)로 조회합니다. 소속 레슨을 함께 싣습니다.
pub async fn list_vocabularies(pool: &SqlitePool) -> Result<Vec<Vocabulary>, AppError> {
    let mut vocabularies = sqlx::query_as::<_, Vocabulary>(&format!(
        "SELECT {VOCABULARY_COLUMNS} FROM vocabularies ORDER BY id ASC"
    ))
    .fetch_all(pool)
    .await?;

    attach_lessons(pool, &mut vocabularies).await?;
    Ok(vocabularies)
}

/// 단일 단어를 조회합니다. 소속 레슨을 함께 싣습니다.
pub async fn get_vocabulary(pool: &SqlitePool, id: i64) -> Result<Option<Vocabulary>, AppError> {
    let Some(vocabulary) = find_vocabulary_row(pool, id).await? else {
        return Ok(None);
    };

    let mut vocabularies = vec![vocabulary];
    attach_lessons(pool, &mut vocabularies).await?;
    Ok(vocabularies.pop())
}

/// 레슨을 싣지 않은 단어 행 하나를 조회합니다.
pub async fn find_vocabulary_row(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Vocabulary>, AppError> {
    let vocabulary = sqlx::query_as::<_, Vocabulary>(&format!(
        "SELECT {VOCABULARY_COLUMNS} FROM vocabularies WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(vocabulary)
}

/// 필요한 레슨 행만 읽어 각 단어에 소속 레슨을 붙입니다.
async fn attach_lessons(pool: &SqlitePool, vocabularies: &mut [Vocabulary]) -> Result<(), AppError> {
    if vocabularies.is_empty() {
        return Ok(());
    }

    let wanted: HashSet<i64> = vocabularies.iter().map(|v| v.lesson_id).collect();
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

    for vocabulary in vocabularies.iter_mut() {
        vocabulary.lesson = by_id.get(&vocabulary.lesson_id).cloned();
    }
    Ok(())
}

/// 새 단어를 생성합니다.
/// 존재하지 않는 레슨을 가리키면 외래키 위반 → 400으로 매핑됩니다.
pub async fn create_vocabulary(
    pool: &SqlitePool,
    new: &NewVocabulary,
) -> Result<Vocabulary, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO vocabularies (lesson_id, hanzi, pinyin, meaning_vn, audio_url,
                                  stroke_order_svg, example_hanzi, example_meaning)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(new.lesson_id)
    .bind(&new.hanzi)
    .bind(&new.pinyin)
    .bind(&new.meaning_vn)
    .bind(&new.audio_url)
    .bind(&new.stroke_order_svg)
    .bind(&new.example_hanzi)
    .bind(&new.example_meaning)
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
    find_vocabulary_row(pool, id)
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created vocabulary".to_string()))
}

/// 단어를 부분 업데이트합니다.
pub async fn update_vocabulary(
    pool: &SqlitePool,
    id: i64,
    patch: &VocabularyPatch,
) -> Result<Option<Vocabulary>, AppError> {
    if find_vocabulary_row(pool, id).await?.is_none() {
        return Ok(None);
    }

    let mut qb: sqlx::QueryBuilder<sqlx::Sqlite> = sqlx::QueryBuilder::new(
        "UPDATE vocabularies SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
    );
    if let Some(lesson_id) = patch.lesson_id {
        qb.push(", lesson_id = ").push_bind(lesson_id);
    }
    if let Some(hanzi) = &patch.hanzi {
        qb.push(", hanzi = ").push_bind(hanzi);
    }
    if let Some(pinyin) = &patch.pinyin {
        qb.push(", pinyin = ").push_bind(pinyin);
    }
    if let Some(meaning_vn) = &patch.meaning_vn {
        qb.push(", meaning_vn = ").push_bind(meaning_vn);
    }
    // NULL 허용 필드: 바깥 Some은 "이 필드를 바꾼다", 안쪽 None은 NULL로 초기화.
    if let Some(audio_url) = &patch.audio_url {
        qb.push(", audio_url = ").push_bind(audio_url.clone());
    }
    if let Some(stroke_order_svg) = &patch.stroke_order_svg {
        qb.push(", stroke_order_svg = ").push_bind(stroke_order_svg.clone());
    }
    if let Some(example_hanzi) = &patch.example_hanzi {
        qb.push(", example_hanzi = ").push_bind(example_hanzi.clone());
    }
    if let Some(example_meaning) = &patch.example_meaning {
        qb.push(", example_meaning = ").push_bind(example_meaning.clone());
    }
    qb.push(" WHERE id = ").push_bind(id);

    qb.build().execute(pool).await.map_err(|e| {
        if is_fk_violation(&e) {
            AppError::BadRequest("lessonId does not reference an existing lesson".to_string())
        } else {
            AppError::from(e)
        }
    })?;

    find_vocabulary_row(pool, id).await
}

/// 단어를 삭제하고 삭제된 행을 반환합니다.
pub async fn delete_vocabulary(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Vocabulary>, AppError> {
    let Some(vocabulary) = find_vocabulary_row(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM vocabularies WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(Some(vocabulary))
}
