//! Parameterized queries for the `news` table.

use sqlx::PgPool;

use super::models::news::{CreateNews, NewsRow, UpdateNews};

const SELECT: &str = "SELECT \
    n.id, n.title, n.slug, n.excerpt, n.content, n.image, \
    u.name AS author, n.created_at, n.status, \
    c.name AS category, n.category_id, \
    n.video_id, n.video_title, n.video_description \
 FROM news n \
 JOIN categories c ON n.category_id = c.id \
 JOIN users u ON n.author_id = u.id";

pub async fn list(pool: &PgPool) -> Result<Vec<NewsRow>, sqlx::Error> {
    sqlx::query_as::<_, NewsRow>(&format!("{SELECT} ORDER BY n.created_at DESC"))
        .fetch_all(pool)
        .await
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<NewsRow>, sqlx::Error> {
    sqlx::query_as::<_, NewsRow>(&format!("{SELECT} WHERE n.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<NewsRow>, sqlx::Error> {
    sqlx::query_as::<_, NewsRow>(&format!("{SELECT} WHERE n.slug = $1"))
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Point lookup used by the slug pre-check probe.
pub async fn slug_exists(pool: &PgPool, slug: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM news WHERE slug = $1)")
        .bind(slug)
        .fetch_one(pool)
        .await
}

/// Insert a new draft article. The UNIQUE index on `slug` is the
/// authoritative uniqueness guard; the caller retries with the next slug
/// candidate on a unique violation.
pub async fn insert(
    pool: &PgPool,
    data: &CreateNews,
    slug: &str,
    author_id: i32,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO news \
            (title, slug, excerpt, content, image, author_id, category_id, \
             video_id, video_title, video_description, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 'draft') \
         RETURNING id",
    )
    .bind(&data.title)
    .bind(slug)
    .bind(&data.excerpt)
    .bind(&data.content)
    .bind(&data.image)
    .bind(author_id)
    .bind(data.category_id)
    .bind(&data.video_id)
    .bind(&data.video_title)
    .bind(&data.video_description)
    .fetch_one(pool)
    .await
}

/// Partial update; the slug is assigned once at creation and never touched
/// here.
pub async fn update(pool: &PgPool, id: i32, data: &UpdateNews) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE news SET \
            title = COALESCE($2, title), \
            excerpt = COALESCE($3, excerpt), \
            content = COALESCE($4, content), \
            image = COALESCE($5, image), \
            category_id = COALESCE($6, category_id), \
            status = COALESCE($7, status), \
            video_id = COALESCE($8, video_id), \
            video_title = COALESCE($9, video_title), \
            video_description = COALESCE($10, video_description), \
            updated_at = now() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.excerpt)
    .bind(&data.content)
    .bind(&data.image)
    .bind(data.category_id)
    .bind(&data.status)
    .bind(&data.video_id)
    .bind(&data.video_title)
    .bind(&data.video_description)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM news WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_status(pool: &PgPool, id: i32, status: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE news SET status = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
