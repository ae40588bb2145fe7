use msp_api::auth::TokenService;
use msp_api::config::{AppConfig, Environment};
use msp_api::services::AuthService;
use msp_api::{database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("starting msp-api in {:?} mode", config.environment);

    config.validate().map_err(anyhow::Error::msg)?;
    if config.environment == Environment::Development && config.has_placeholder_secret() {
        tracing::warn!("JWT_SECRET is not set; tokens are signed with the development fallback");
    }

    let pool = database::connect(&config.database).await?;
    sqlx::migrate!().run(&pool).await?;

    let tokens = TokenService::new(&config.security.jwt_secret, config.security.jwt_expiry_hours);
    let auth = AuthService::new(pool.clone(), tokens.clone());
    let state = AppState { pool, tokens, auth };

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("msp-api listening on http://{}", bind_addr);

    axum::serve(listener, msp_api::app(state)).await?;
    Ok(())
}
