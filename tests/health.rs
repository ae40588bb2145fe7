//! Health endpoint behavior when the store is unreachable.

use anyhow::Result;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tower::ServiceExt;

use msp_api::auth::TokenService;
use msp_api::services::AuthService;
use msp_api::{app, AppState};

#[tokio::test]
async fn degraded_health_never_exposes_database_detail() -> Result<()> {
    // Port 1 refuses immediately; the short timeout is a backstop
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(2))
        .connect_lazy("postgres://127.0.0.1:1/msp")
        .expect("lazy pool");
    let tokens = TokenService::new("health-test-secret", 24);
    let auth = AuthService::new(pool.clone(), tokens.clone());
    let app = app(AppState { pool, tokens, auth });

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let bytes = response.into_body().collect().await?.to_bytes();
    let body: Value = serde_json::from_slice(&bytes)?;

    assert_eq!(body["status"], "degraded");
    assert_eq!(body["database"], "unreachable");
    // The underlying sqlx error must stay in the logs
    assert!(body.get("database_error").is_none());
    Ok(())
}
