/// Configuration for the notes service
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string (required)
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 10)
/// - `NOTES_HOST`: bind host (default: 0.0.0.0)
/// - `NOTES_PORT`: bind port (default: 8002)
/// - `SECRET_KEY`: must be the same value the auth service was started
///   with, or every request here will be rejected; see
///   [`notevault_shared::config::token_config_from_env`]
use notevault_shared::{auth::token::TokenConfig, config::token_config_from_env, db::pool::DatabaseConfig};
use std::env;

/// Complete notes service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP bind configuration
    pub api: ApiConfig,

    /// Database pool configuration
    pub database: DatabaseConfig,

    /// Token verification configuration (the verifier half of the trust
    /// contract)
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
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("NOTES_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("NOTES_PORT")
            .unwrap_or_else(|_| "8002".to_string())
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
