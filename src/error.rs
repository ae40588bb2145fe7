// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Messages here are the exact strings clients see; anything sensitive (SQL
/// text, which half of a credential pair was wrong) is logged and replaced
/// with a generic message before it reaches this type.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Validation(String),

    // 401 Unauthorized - `code` distinguishes the auth failure for clients
    #[error("{message}")]
    Unauthorized { message: String, code: &'static str },

    // 403 Forbidden
    #[error("{0}")]
    Forbidden(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 409 Conflict
    #[error("{0}")]
    Conflict(String),

    // 500 Internal Server Error
    #[error("{0}")]
    Internal(String),

    // 503 Service Unavailable
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized { code, .. } => code,
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

/// True for a unique-constraint violation (PostgreSQL SQLSTATE 23505).
/// The slug insert path uses this to advance to the next candidate instead of
/// surfacing a conflict.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::Unauthorized {
                message: "no authentication token provided".to_string(),
                code: "MISSING_TOKEN",
            },
            AuthError::InvalidToken => ApiError::Unauthorized {
                message: "invalid or expired token".to_string(),
                code: "INVALID_TOKEN",
            },
            AuthError::InvalidCredentials => ApiError::Unauthorized {
                message: "invalid credentials".to_string(),
                code: "INVALID_CREDENTIALS",
            },
            AuthError::AccountInactive => ApiError::Unauthorized {
                message: "account is inactive".to_string(),
                code: "ACCOUNT_INACTIVE",
            },
            AuthError::PrincipalNotFound => ApiError::Unauthorized {
                message: "user not found".to_string(),
                code: "PRINCIPAL_NOT_FOUND",
            },
            AuthError::Forbidden => ApiError::Forbidden("admin role required".to_string()),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => ApiError::not_found("record not found"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                tracing::error!("database unavailable: {}", err);
                ApiError::ServiceUnavailable("database temporarily unavailable".to_string())
            }
            _ => {
                // Never expose SQL-level detail to clients
                tracing::error!("database error: {}", err);
                ApiError::internal("an error occurred while processing the request")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = json!({
            "error": true,
            "message": self.to_string(),
            "code": self.error_code(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_errors_map_to_distinct_codes() {
        let cases = [
            (AuthError::MissingToken, StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            (AuthError::InvalidToken, StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            (AuthError::InvalidCredentials, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
            (AuthError::AccountInactive, StatusCode::UNAUTHORIZED, "ACCOUNT_INACTIVE"),
            (AuthError::PrincipalNotFound, StatusCode::UNAUTHORIZED, "PRINCIPAL_NOT_FOUND"),
            (AuthError::Forbidden, StatusCode::FORBIDDEN, "FORBIDDEN"),
        ];
        for (err, status, code) in cases {
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), status);
            assert_eq!(api.error_code(), code);
        }
    }

    #[test]
    fn credential_errors_share_one_message() {
        // Unknown email and wrong password must be indistinguishable to clients
        let api: ApiError = AuthError::InvalidCredentials.into();
        assert_eq!(api.to_string(), "invalid credentials");
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let api: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(api.status_code(), StatusCode::NOT_FOUND);
    }
}
