/// Route handlers for the auth service
///
/// - `health`: liveness endpoint
/// - `auth`: registration and the credential-for-token exchange
pub mod auth;
pub mod health;
