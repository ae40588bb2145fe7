use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

/// Development fallback only; production deployments must set JWT_SECRET.
const DEV_JWT_SECRET: &str = "msp-dev-secret-change-me";

impl AppConfig {
    /// Build configuration from environment-specific defaults plus env overrides.
    /// The resulting value is materialized once in `main` and injected into the
    /// services that need it; nothing reads configuration from ambient state.
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            self.database.acquire_timeout_secs =
                v.parse().unwrap_or(self.database.acquire_timeout_secs);
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost/msp".to_string(),
                max_connections: 10,
                acquire_timeout_secs: 30,
            },
            security: SecurityConfig {
                jwt_secret: DEV_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig {
                url: "postgres://localhost/msp".to_string(),
                max_connections: 50,
                acquire_timeout_secs: 5,
            },
            security: SecurityConfig {
                // Empty on purpose: startup warns loudly when the override is missing
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    /// True when the signing secret is absent or the development fallback.
    pub fn has_placeholder_secret(&self) -> bool {
        self.security.jwt_secret.is_empty() || self.security.jwt_secret == DEV_JWT_SECRET
    }

    /// Reject configurations that must not reach production: signing tokens
    /// with an empty or well-known secret is worse than refusing to start.
    pub fn validate(&self) -> Result<(), String> {
        if self.environment == Environment::Production && self.has_placeholder_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.security.jwt_expiry_hours, 24);
        assert!(config.has_placeholder_secret());
    }

    #[test]
    fn production_defaults_have_no_baked_in_secret() {
        let config = AppConfig::production();
        assert_eq!(config.environment, Environment::Production);
        assert!(config.security.jwt_secret.is_empty());
        assert!(config.has_placeholder_secret());
    }

    #[test]
    fn production_without_a_real_secret_fails_validation() {
        let config = AppConfig::production();
        assert!(config.validate().is_err());

        let mut config = AppConfig::production();
        config.security.jwt_secret = "an-actual-deployment-secret".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn development_validates_with_the_fallback_secret() {
        assert!(AppConfig::development().validate().is_ok());
    }
}
