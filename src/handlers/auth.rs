use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::database::models::user::LoginRequest;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::routes::AppState;
use crate::services::LoginResponse;

/// POST /api/auth/login - authenticate and receive a token plus the
/// public-safe user projection.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("email and password are required"));
    }
    let response = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(response))
}

/// GET /api/auth/verify - re-validate the session against the store. Unlike
/// the route gate, this catches accounts deactivated after token issuance.
pub async fn verify(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let user = state.auth.whoami(user.id).await?;
    Ok(Json(json!({ "user": user })))
}
