/// Environment loading for the shared trust configuration
///
/// Both services must end up with byte-identical [`TokenConfig`] values, so
/// the loading logic lives here rather than being duplicated per service.
///
/// # Environment Variables
///
/// - `SECRET_KEY`: the shared signing secret. Absent or empty, the loader
///   falls back to [`INSECURE_DEV_SECRET`] so local development works out of
///   the box, with a loud warning. Production deployments must override it.
/// - `ACCESS_TOKEN_EXPIRE_MINUTES`: default token ttl (default: 30).
use chrono::Duration;
use std::env;

use crate::auth::token::TokenConfig;

/// Development-only fallback secret
///
/// Documented and deliberate: it keeps `docker compose up` working without a
/// .env file. Anything reachable from outside localhost must set
/// `SECRET_KEY`.
pub const INSECURE_DEV_SECRET: &str = "supersecretkey";

/// Default access token time-to-live in minutes
pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Loads the token configuration from the process environment
///
/// Reads the environment exactly once; the returned config is immutable for
/// the process lifetime and should be handed to the issuer/verifier
/// constructors at startup.
pub fn token_config_from_env() -> TokenConfig {
    let secret = match env::var("SECRET_KEY") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            tracing::warn!(
                "SECRET_KEY is not set; using the insecure development secret. \
                 Do not run this configuration in production."
            );
            INSECURE_DEV_SECRET.to_string()
        }
    };

    let ttl_minutes = env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);

    TokenConfig::new(secret, Duration::minutes(ttl_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_thirty_minutes() {
        assert_eq!(DEFAULT_TOKEN_TTL_MINUTES, 30);
    }

    #[test]
    fn test_insecure_default_matches_both_services() {
        // The constant is the contract: if this changes, issuer and verifier
        // must pick it up together via the shared crate.
        assert_eq!(INSECURE_DEV_SECRET, "supersecretkey");
    }
}
