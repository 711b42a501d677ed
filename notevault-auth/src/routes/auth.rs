/// Registration and login endpoints
///
/// # Endpoints
///
/// - `POST /register`: create an account (JSON body)
/// - `POST /token`: exchange username/password for an access token
///   (form-encoded body, the OAuth2 password-flow shape clients post)
///
/// Both endpoints run the Argon2id work on the blocking thread pool: a
/// password hash deliberately costs tens of milliseconds of CPU, and that
/// must not stall the async request loop under a login burst.
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, Form, Json};
use notevault_shared::{
    auth::password,
    models::user::{CreateUser, User},
};
use serde::{Deserialize, Serialize};
use serde_json::Map;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(length(min = 1, max = 64, message = "Username must be 1-64 characters"))]
    pub username: String,

    /// Password (any length and alphabet; the hasher pre-digests it)
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Created user ID
    pub id: String,

    /// Created username
    pub username: String,
}

/// Login (token) request, form-encoded
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Username
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// Signed access token
    pub access_token: String,

    /// Always "bearer"
    pub token_type: String,
}

/// Registers a new user
///
/// # Errors
///
/// - `422`: validation failed
/// - `409`: username already taken
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    req.validate()?;

    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&password))
        .await
        .map_err(|e| ApiError::InternalError(format!("hashing task failed: {}", e)))??;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(username = %user.username, "registered new user");

    Ok(Json(RegisterResponse {
        id: user.id.to_string(),
        username: user.username,
    }))
}

/// Exchanges credentials for a signed access token
///
/// Looks up the stored credential, verifies the password off the request
/// loop, and issues a token whose subject is the username. An unknown
/// username and a wrong password produce the identical rejection.
///
/// # Errors
///
/// - `401`: invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Form(req): Form<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let password = req.password;
    let hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
        .await
        .map_err(|e| ApiError::InternalError(format!("verification task failed: {}", e)))?;

    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    // Default ttl from configuration; no extra claims carried today.
    let access_token = state.issuer.issue(&user.username, Map::new(), None)?;

    tracing::info!(username = %user.username, "issued access token");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let ok = RegisterRequest {
            username: "alice".to_string(),
            password: "hunter2!".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty_username = RegisterRequest {
            username: "".to_string(),
            password: "hunter2!".to_string(),
        };
        assert!(empty_username.validate().is_err());

        let empty_password = RegisterRequest {
            username: "alice".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }

    #[test]
    fn test_token_response_shape() {
        let response = TokenResponse {
            access_token: "abc.def.ghi".to_string(),
            token_type: "bearer".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["token_type"], "bearer");
        assert_eq!(value["access_token"], "abc.def.ghi");
    }
}
