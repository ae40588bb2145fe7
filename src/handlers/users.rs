//! User management endpoints. Every operation here is admin-only: the route
//! gate authenticates, and each handler evaluates the role gate itself.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::database::models::user::{CreateUser, UpdateUser, UserSummary};
use crate::database::models::AccountStatus;
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::routes::AppState;

pub async fn list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> Result<Json<Vec<UserSummary>>, ApiError> {
    caller.require_admin()?;
    Ok(Json(users::list(&state.pool).await?))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<UserSummary>, ApiError> {
    caller.require_admin()?;
    users::find_summary(&state.pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("user not found"))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    caller.require_admin()?;
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(ApiError::validation("name and email are required"));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::validation("password must be at least 8 characters"));
    }
    if users::email_taken(&state.pool, &payload.email, None).await? {
        return Err(ApiError::conflict("email is already registered"));
    }

    let hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|err| ApiError::internal(format!("password hashing failed: {}", err)))?;
    let id = users::insert(&state.pool, &payload, &hash).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": id,
            "name": payload.name,
            "email": payload.email,
            "role_id": payload.role_id,
        })),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUser>,
) -> Result<Json<Value>, ApiError> {
    caller.require_admin()?;
    if let Some(email) = &payload.email {
        if users::email_taken(&state.pool, email, Some(id)).await? {
            return Err(ApiError::conflict("email is already registered"));
        }
    }
    if let Some(status) = &payload.status {
        if AccountStatus::parse(status).is_none() {
            return Err(ApiError::validation("invalid status"));
        }
    }

    let hash = match &payload.password {
        Some(password) => Some(
            bcrypt::hash(password, bcrypt::DEFAULT_COST)
                .map_err(|err| ApiError::internal(format!("password hashing failed: {}", err)))?,
        ),
        None => None,
    };

    let affected = users::update(&state.pool, id, &payload, hash.as_deref()).await?;
    if affected == 0 {
        return Err(ApiError::not_found("user not found"));
    }
    Ok(Json(json!({ "message": "user updated" })))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    caller.require_admin()?;
    let affected = users::delete(&state.pool, id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("user not found"));
    }
    Ok(Json(json!({ "message": "user deleted" })))
}

/// PUT /api/users/:id/status - deactivation is a status flip, not removal.
/// Outstanding tokens stay valid until expiry; only the verify endpoint
/// notices the change before then.
pub async fn set_status(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    caller.require_admin()?;
    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(AccountStatus::parse)
        .ok_or_else(|| ApiError::validation("invalid status"))?;

    let affected = users::set_status(&state.pool, id, status.as_str()).await?;
    if affected == 0 {
        return Err(ApiError::not_found("user not found"));
    }
    Ok(Json(json!({ "message": "user status updated" })))
}
