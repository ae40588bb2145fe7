use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use tracing::warn;

use crate::auth::{AuthError, TokenService};
use crate::database::models::user::{PublicUser, User};
use crate::database::users;
use crate::error::ApiError;

/// Store operations the auth flow depends on. The seam exists so login and
/// session re-validation can be exercised against a fake store; production
/// code always uses [`PgPrincipals`].
#[async_trait]
pub trait PrincipalStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error>;
    async fn touch_last_login(&self, id: i32) -> Result<(), sqlx::Error>;
}

/// PostgreSQL-backed principal store delegating to the user queries.
pub struct PgPrincipals {
    pool: PgPool,
}

impl PgPrincipals {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalStore for PgPrincipals {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        users::find_by_email(&self.pool, email).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, sqlx::Error> {
        users::find_by_id(&self.pool, id).await
    }

    async fn touch_last_login(&self, id: i32) -> Result<(), sqlx::Error> {
        users::touch_last_login(&self.pool, id).await
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Login and session re-validation. Constructed once in `main` with its
/// collaborators and handed to call sites through application state.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn PrincipalStore>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: TokenService) -> Self {
        Self::with_store(Arc::new(PgPrincipals::new(pool)), tokens)
    }

    pub fn with_store(store: Arc<dyn PrincipalStore>, tokens: TokenService) -> Self {
        Self { store, tokens }
    }

    /// Authenticate an email/password pair and issue a token. Unknown email
    /// and wrong password produce the same rejection so registered addresses
    /// are not enumerable.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let user = self.store.find_by_email(email).await?;
        let user = authenticate(user, password)?;

        // Best-effort: a failed timestamp update must not block the login
        if let Err(err) = self.store.touch_last_login(user.id).await {
            warn!("failed to update last login for user {}: {}", user.id, err);
        }

        let token = self.tokens.issue(&user).map_err(|err| {
            tracing::error!("token issuance failed: {}", err);
            ApiError::internal("failed to issue token")
        })?;

        Ok(LoginResponse { token, user: PublicUser::from(&user) })
    }

    /// Re-validate a session against the store rather than trusting token
    /// claims. This is the only check that catches an account deactivated
    /// after its token was issued; the per-request gate deliberately checks
    /// signature and expiry only.
    pub async fn whoami(&self, user_id: i32) -> Result<PublicUser, ApiError> {
        let user = self
            .store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;
        if !user.is_active() {
            return Err(AuthError::AccountInactive.into());
        }
        Ok(PublicUser::from(&user))
    }
}

/// Pure login decision: lookup result plus supplied password in, user out.
/// The inactive check runs before the password comparison on purpose; a
/// disabled account rejects without touching the hash.
fn authenticate(user: Option<User>, password: &str) -> Result<User, AuthError> {
    let user = user.ok_or(AuthError::InvalidCredentials)?;
    if !user.is_active() {
        return Err(AuthError::AccountInactive);
    }
    let matches = bcrypt::verify(password, &user.password_hash)
        .map_err(|_| AuthError::InvalidCredentials)?;
    if !matches {
        return Err(AuthError::InvalidCredentials);
    }
    Ok(user)
}
