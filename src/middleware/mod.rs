pub mod auth;

pub use auth::{auth_middleware, AuthUser, ADMIN_ROLE_ID};
