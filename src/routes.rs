use axum::{
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::TokenService;
use crate::handlers::{auth, categories, news, users, videos};
use crate::middleware::auth_middleware;
use crate::services::AuthService;

/// Shared application state, constructed once in `main` and injected into
/// every handler and the auth gate. There are no module-level singletons.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
    pub auth: AuthService,
}

pub fn app(state: AppState) -> Router {
    let guard = axum_middleware::from_fn_with_state(state.clone(), auth_middleware);

    // The gate runs before any handler logic on these routes
    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify))
        .route("/api/users", get(users::list).post(users::create))
        .route(
            "/api/users/:id",
            get(users::get).put(users::update).delete(users::remove),
        )
        .route("/api/users/:id/status", put(users::set_status))
        .route("/api/categories", post(categories::create))
        .route(
            "/api/categories/:id",
            put(categories::update).delete(categories::remove),
        )
        .route("/api/categories/:id/status", put(categories::set_status))
        .route("/api/news", post(news::create))
        .route("/api/news/:id", put(news::update).delete(news::remove))
        .route("/api/news/:id/status", put(news::set_status))
        .route("/api/videos", post(videos::create))
        .route("/api/videos/:id", put(videos::update).delete(videos::remove))
        .route("/api/videos/:id/status", put(videos::set_status))
        .route_layer(guard);

    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/auth/login", post(auth::login))
        .route("/api/categories", get(categories::list))
        .route("/api/categories/:id", get(categories::get))
        .route("/api/news", get(news::list))
        .route("/api/news/:id", get(news::get))
        .route("/api/news/slug/:slug", get(news::get_by_slug))
        .route("/api/videos", get(videos::list))
        .route("/api/videos/:id", get(videos::get))
        .route("/api/videos/slug/:slug", get(videos::get_by_slug));

    protected
        .merge(public)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "MSP API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth/login (public), /api/auth/verify (bearer)",
            "users": "/api/users (bearer, admin)",
            "categories": "/api/categories (reads public, writes bearer)",
            "news": "/api/news (reads public, writes bearer)",
            "videos": "/api/videos (reads public, writes bearer)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();
    match crate::database::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "database": "ok" })),
        ),
        Err(err) => {
            // Same policy as ApiError: log the real failure, never ship
            // database detail to clients
            tracing::error!("health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unreachable",
                })),
            )
        }
    }
}
