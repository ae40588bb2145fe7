//! Parameterized queries for the `users` table.

use sqlx::PgPool;

use super::models::user::{CreateUser, UpdateUser, User, UserSummary};

const SUMMARY_COLUMNS: &str = "id, name, email, role_id, status, last_login_at, created_at";

pub async fn list(pool: &PgPool) -> Result<Vec<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn find_summary(pool: &PgPool, id: i32) -> Result<Option<UserSummary>, sqlx::Error> {
    sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// True when another user already holds `email`. `exclude` skips the user
/// being edited so an unchanged email does not conflict with itself.
pub async fn email_taken(
    pool: &PgPool,
    email: &str,
    exclude: Option<i32>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id != COALESCE($2, -1))",
    )
    .bind(email)
    .bind(exclude)
    .fetch_one(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    data: &CreateUser,
    password_hash: &str,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO users (name, email, password_hash, role_id) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(password_hash)
    .bind(data.role_id)
    .fetch_one(pool)
    .await
}

/// Partial update; absent fields keep their stored value.
pub async fn update(
    pool: &PgPool,
    id: i32,
    data: &UpdateUser,
    password_hash: Option<&str>,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE users SET \
            name = COALESCE($2, name), \
            email = COALESCE($3, email), \
            password_hash = COALESCE($4, password_hash), \
            role_id = COALESCE($5, role_id), \
            status = COALESCE($6, status), \
            updated_at = now() \
         WHERE id = $1",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.email)
    .bind(password_hash)
    .bind(data.role_id)
    .bind(&data.status)
    .execute(pool)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(pool: &PgPool, id: i32) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn set_status(pool: &PgPool, id: i32, status: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET status = $2, updated_at = now() WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Best-effort on the login path: the caller logs a warning on failure
/// instead of failing the login.
pub async fn touch_last_login(pool: &PgPool, id: i32) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET last_login_at = now() WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await
        .map(|_| ())
}
