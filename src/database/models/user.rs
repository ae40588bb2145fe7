use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::AccountStatus;

/// Full user row, including the password hash. Never serialized to clients;
/// handlers respond with [`PublicUser`] or [`UserSummary`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i32,
    pub status: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        AccountStatus::parse(&self.status) == Some(AccountStatus::Active)
    }
}

/// Public-safe projection returned from login and session verification.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: i32,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role_id: user.role_id,
        }
    }
}

/// Listing/detail projection for user management endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: i32,
    pub status: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role_id: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Fixture constructor shared by unit tests across the crate.
#[cfg(test)]
pub fn test_user(id: i32, name: &str, email: &str, role_id: i32, status: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        role_id,
        status: status.to_string(),
        last_login_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
