/// Configuration for the auth service
///
/// Loaded once from environment variables at startup; immutable afterwards.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `AUTH_HOST`: bind host (default: 0.0.0.0)
/// - `AUTH_PORT`: bind port (default: 8001)
/// - `SECRET_KEY` / `ACCESS_TOKEN_EXPIRE_MINUTES`: see
///   [`notevault_shared::config::token_config_from_env`]
use notevault_shared::{auth::token::TokenConfig, config::token_config_from_env, db::pool::DatabaseConfig};
use std::env;

/// Complete auth service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind configuration
    pub api: ApiConfig,

    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Token signing configuration (the issuer half of the trust contract)
    pub token: TokenConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Fails if `DATABASE_URL` is absent or a numeric variable does not
    /// parse. A missing `SECRET_KEY` is not an error here; the shared
    /// loader falls back to the documented development secret with a
    /// warning.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env if present (development convenience)
        dotenvy::dotenv().ok();

        let host = env::var("AUTH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("AUTH_PORT")
            .unwrap_or_else(|_| "8001".to_string())
            .parse::<u16>()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        Ok(Self {
            api: ApiConfig { host, port },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                ..Default::default()
            },
            token: token_config_from_env(),
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8001,
            },
            database: DatabaseConfig::default(),
            token: TokenConfig::new("test-secret", Duration::minutes(30)),
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8001");
    }
}
