//! Request-level tests for the authentication gate. Every case here is
//! rejected before any handler touches the database, so the pool is built
//! lazily and never connects.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use msp_api::auth::TokenService;
use msp_api::database::models::user::User;
use msp_api::services::AuthService;
use msp_api::{app, AppState};

const TEST_SECRET: &str = "gate-test-secret";

fn test_app() -> axum::Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/msp_gate_test_unused")
        .expect("lazy pool");
    let tokens = TokenService::new(TEST_SECRET, 24);
    let auth = AuthService::new(pool.clone(), tokens.clone());
    app(AppState { pool, tokens, auth })
}

fn editor() -> User {
    User {
        id: 42,
        name: "Edi Torres".to_string(),
        email: "edi@example.com".to_string(),
        password_hash: String::new(),
        role_id: 2,
        status: "active".to_string(),
        last_login_at: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

async fn body_json(response: axum::response::Response) -> Result<Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

#[tokio::test]
async fn protected_route_without_token_is_rejected() -> Result<()> {
    let response = test_app()
        .oneshot(Request::builder().uri("/api/auth/verify").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "MISSING_TOKEN");
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_counts_as_missing_token() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/auth/verify")
                .header("authorization", "Basic dXNlcjpwdw==")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "MISSING_TOKEN");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_rejected() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/auth/verify")
                .header("authorization", "Bearer not.a.token")
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let tokens = TokenService::new(TEST_SECRET, 24);
    let token = tokens.issue_at(&editor(), Utc::now() - Duration::hours(48))?;

    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/auth/verify")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() -> Result<()> {
    let foreign = TokenService::new("some-other-secret", 24);
    let token = foreign.issue(&editor())?;

    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/auth/verify")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "INVALID_TOKEN");
    Ok(())
}

#[tokio::test]
async fn non_admin_is_forbidden_from_user_management() -> Result<()> {
    // Valid token, wrong role: the role gate fires in the handler, before
    // any query runs
    let tokens = TokenService::new(TEST_SECRET, 24);
    let token = tokens.issue(&editor())?;

    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn login_requires_email_and_password() -> Result<()> {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"email":"","password":""}"#))?,
        )
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    Ok(())
}

#[tokio::test]
async fn public_routes_skip_the_gate() -> Result<()> {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await?;
    assert_eq!(body["name"], "MSP API");
    Ok(())
}
