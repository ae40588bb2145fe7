//! Parameterized queries for the `categories` table.

use sqlx::PgPool;

use super::models::category::{Category, CreateCategory, UpdateCategory};

const COLUMNS: &str = "id, name, description, status, created_at";

pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM categories ORDER BY name"))
        .fetch_all(pool)
        .await
}

pub async fn find(pool: &PgPool, id: i32) -> Result<Option<Category>, sqlx::Error> {
    sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM categories WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn name_taken(
    pool: &PgPool,
    name: &str,
    exclude: Option<i32>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM categories WHERE name = $1 AND id != COALESCE($2, -1))",
    )
    .bind(name)
    .bind(exclude)
    .fetch_one(pool)
    .await
}

pub async fn insert(pool: &PgPool, data: &CreateCategory) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.description)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: i32, data: &UpdateCategory) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE categories SET \
            name = COALESCE($2, name), \
            description = COALESCE($3, description), \
            status = COALESCE($4, status), \
            updated_at = now() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.status)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_status(pool: &PgPool, id: i32, status: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE categories SET status = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
