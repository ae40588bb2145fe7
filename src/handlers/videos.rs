//! Video endpoints; same shape and slug contract as news.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::database::models::video::{CreateVideo, UpdateVideo, VideoRow};
use crate::database::models::ContentStatus;
use crate::database::videos;
use crate::error::{is_unique_violation, ApiError};
use crate::middleware::AuthUser;
use crate::routes::AppState;
use crate::slug;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<VideoRow>>, ApiError> {
    Ok(Json(videos::list(&state.pool).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VideoRow>, ApiError> {
    videos::find(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("video not found"))
}

pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<VideoRow>, ApiError> {
    videos::find_by_slug(&state.pool, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("video not found"))
}

/// POST /api/videos - slug assignment works exactly like the news create:
/// probe as a pre-check, unique index as the authority, next counter on a
/// constraint violation.
pub async fn create(
    State(state): State<AppState>,
    Extension(author): Extension<AuthUser>,
    Json(payload): Json<CreateVideo>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.title.trim().is_empty() {
        return Err(ApiError::validation("title is required"));
    }
    if payload.youtube_id.trim().is_empty() {
        return Err(ApiError::validation("youtube_id is required"));
    }

    let mut candidates = slug::Candidates::new(&payload.title, Utc::now());
    let (id, assigned) = loop {
        let candidate = candidates.next_candidate();
        if videos::slug_exists(&state.pool, &candidate).await? {
            continue;
        }
        match videos::insert(&state.pool, &payload, &candidate, author.id).await {
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
            "youtube_id": payload.youtube_id,
            "author_id": author.id,
            "category_id": payload.category_id,
            "status": ContentStatus::Draft,
        })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateVideo>,
) -> Result<Json<Value>, ApiError> {
    if let Some(status) = &payload.status {
        if ContentStatus::parse(status).is_none() {
            return Err(ApiError::validation("invalid status"));
        }
    }
    let affected = videos::update(&state.pool, id, &payload).await?;
    if affected == 0 {
        return Err(ApiError::not_found("video not found"));
    }
    Ok(Json(json!({ "message": "video updated" })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let affected = videos::delete(&state.pool, id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("video not found"));
    }
    Ok(Json(json!({ "message": "video deleted" })))
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

    let affected = videos::set_status(&state.pool, id, status.as_str()).await?;
    if affected == 0 {
        return Err(ApiError::not_found("video not found"));
    }
    Ok(Json(json!({ "message": "video status updated" })))
}
