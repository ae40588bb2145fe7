//! Parameterized queries for the `videos` table.

use sqlx::PgPool;

use super::models::video::{CreateVideo, UpdateVideo, VideoRow};

const SELECT: &str = "SELECT \
    v.id, v.title, v.slug, v.youtube_id, v.description, v.thumbnail, \
    u.name AS author, v.created_at, v.status, \
    c.name AS category, v.category_id \
 FROM videos v \
 JOIN categories c ON v.category_id = c.id \
 JOIN users u ON v.author_id = u.id";

pub async fn list(pool: &PgPool) -> Result<Vec<VideoRow>, sqlx::Error> {
    sqlx::query_as::<_, VideoRow>(&format!("{SELECT} ORDER BY v.created_at DESC"))
        .fetch_all(pool)
        .await
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<VideoRow>, sqlx::Error> {
    sqlx::query_as::<_, VideoRow>(&format!("{SELECT} WHERE v.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<VideoRow>, sqlx::Error> {
    sqlx::query_as::<_, VideoRow>(&format!("{SELECT} WHERE v.slug = $1"))
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Point lookup used by the slug pre-check probe.
pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM videos WHERE slug = $1)")
        .bind(slug)
        .fetch_one(pool)
        .await
}

/// Insert a new draft video; same slug contract as the news insert.
pub async fn insert(
    pool: &PgPool,
    data: &CreateVideo,
    slug: &str,
    author_id: i32,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO videos \
            (title, slug, youtube_id, description, thumbnail, author_id, category_id, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, 'draft') \
         RETURNING id",
    )
    .bind(&data.title)
    .bind(slug)
    .bind(&data.youtube_id)
    .bind(&data.description)
    .bind(&data.thumbnail)
    .bind(author_id)
    .bind(data.category_id)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: i32, data: &UpdateVideo) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE videos SET \
            title = COALESCE($2, title), \
            youtube_id = COALESCE($3, youtube_id), \
            description = COALESCE($4, description), \
            thumbnail = COALESCE($5, thumbnail), \
            category_id = COALESCE($6, category_id), \
            status = COALESCE($7, status), \
            updated_at = now() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.youtube_id)
    .bind(&data.description)
    .bind(&data.thumbnail)
    .bind(data.category_id)
    .bind(&data.status)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_status(pool: &PgPool, id: i32, status: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE videos SET status = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
