use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Claims};
use crate::error::ApiError;
use crate::routes::AppState;

/// Role id holding administrative access (user management).
pub const ADMIN_ROLE_ID: i32 = 1;

/// Authenticated principal attached to the request after token verification.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: i32,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            role_id: claims.role_id,
        }
    }
}

impl AuthUser {
    /// Authorization gate for admin-only operations, evaluated by the calling
    /// handler rather than by token verification.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role_id == ADMIN_ROLE_ID {
            Ok(())
        } else {
            Err(AuthError::Forbidden.into())
        }
    }
}

/// Bearer-token gate for protected routes. Checks signature and expiry only;
/// store state is deliberately not re-read per request, so a deactivated
/// account keeps a working token until expiry unless the handler re-validates
/// (the verify endpoint does).
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = {
        let token = bearer_token(request.headers()).ok_or(AuthError::MissingToken)?;
        state.tokens.verify(token)?
    };
    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`. An absent header,
/// a non-Bearer scheme, or an empty token all count as "no token provided".
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get("authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
