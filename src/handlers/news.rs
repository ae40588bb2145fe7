//! News article endpoints. Reads are public; mutations sit behind the auth
//! gate and stamp the author from the verified claims.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::database::models::news::{CreateNews, NewsResponse, UpdateNews};
use crate::database::models::ContentStatus;
use crate::database::news;
use crate::error::{is_unique_violation, ApiError};
use crate::middleware::AuthUser;
use crate::routes::AppState;
use crate::slug;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<NewsResponse>>, ApiError> {
    let rows = news::list(&state.pool).await?;
    Ok(Json(rows.into_iter().map(NewsResponse::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<NewsResponse>, ApiError> {
    news::find(&state.pool, id)
        .await?
        .map(|row| Json(NewsResponse::from(row)))
        .ok_or_else(|| ApiError::not_found("article not found"))
}

pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<NewsResponse>, ApiError> {
    news::find_by_slug(&state.pool, &slug)
        .await?
        .map(|row| Json(NewsResponse::from(row)))
        .ok_or_else(|| ApiError::not_found("article not found"))
}

/// POST /api/news - create a draft article with a freshly assigned slug.
///
/// The probe is only a friendly pre-check; the UNIQUE index on `news.slug`
/// decides. If a concurrent creation wins the same candidate between probe
/// and insert, the violation advances the loop to the next counter value.
pub async fn create(
    State(state): State<AppState>,
    Extension(author): Extension<AuthUser>,
    Json(payload): Json<CreateNews>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("title is required"));
    }

    let mut candidates = slug::Candidates::new(&payload.title, Utc::now());
    let (id, assigned) = loop {
        let candidate = candidates.next_candidate();
        if news::slug_exists(&state.pool, &candidate).await? {
            continue;
        }
        match news::insert(&state.pool, &payload, &candidate, author.id).await {
            Ok(id) => break (id, candidate),
            Err(err) if is_unique_violation(&err) => continue,
            Err(err) => return Err(err.into()),
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "title": payload.title,
            "slug": assigned,
            "author_id": author.id,
            "category_id": payload.category_id,
            "status": ContentStatus::Draft,
        })),
    ))
}

/// PUT /api/news/:id - partial update. The slug is immutable here; it was
/// assigned once at creation.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateNews>,
) -> Result<Json<Value>, ApiError> {
    if let Some(status) = &payload.status {
        if ContentStatus::parse(status).is_none() {
            return Err(ApiError::validation("invalid status"));
        }
    }
    let affected = news::update(&state.pool, id, &payload).await?;
    if affected == 0 {
        return Err(ApiError::not_found("article not found"));
    }
    Ok(Json(json!({ "message": "article updated" })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let affected = news::delete(&state.pool, id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("article not found"));
    }
    Ok(Json(json!({ "message": "article deleted" })))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(ContentStatus::parse)
        .ok_or_else(|| ApiError::validation("invalid status"))?;

    let affected = news::set_status(&state.pool, id, status.as_str()).await?;
    if affected == 0 {
        return Err(ApiError::not_found("article not found"));
    }
    Ok(Json(json!({ "message": "article status updated" })))
}
