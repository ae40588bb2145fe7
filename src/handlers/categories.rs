//! Category endpoints. Reads are public; mutations sit behind the auth gate.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::database::categories;
use crate::database::models::category::{Category, CreateCategory, UpdateCategory};
use crate::database::models::AccountStatus;
use crate::error::ApiError;
use crate::routes::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(categories::list(&state.pool).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Category>, ApiError> {
    categories::find(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("category not found"))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategory>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("name is required"));
    }
    if categories::name_taken(&state.pool, &payload.name, None).await? {
        return Err(ApiError::conflict("a category with that name already exists"));
    }
    let id = categories::insert(&state.pool, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "name": payload.name,
            "description": payload.description,
            "status": "active",
        })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCategory>,
) -> Result<Json<Value>, ApiError> {
    if let Some(name) = &payload.name {
        if categories::name_taken(&state.pool, name, Some(id)).await? {
            return Err(ApiError::conflict("a category with that name already exists"));
        }
    }
    if let Some(status) = &payload.status {
        if AccountStatus::parse(status).is_none() {
            return Err(ApiError::validation("invalid status"));
        }
    }
    let affected = categories::update(&state.pool, id, &payload).await?;
    if affected == 0 {
        return Err(ApiError::not_found("category not found"));
    }
    Ok(Json(json!({ "message": "category updated" })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let affected = categories::delete(&state.pool, id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("category not found"));
    }
    Ok(Json(json!({ "message": "category deleted" })))
}

pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(AccountStatus::parse)
        .ok_or_else(|| ApiError::validation("invalid status"))?;

    let affected = categories::set_status(&state.pool, id, status.as_str()).await?;
    if affected == 0 {
        return Err(ApiError::not_found("category not found"));
    }
    Ok(Json(json!({ "message": "category status updated" })))
}
