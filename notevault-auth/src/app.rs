/// Application state and router builder for the auth service
///
/// # Routes
///
/// ```text
/// GET  /health    # liveness + database connectivity (public)
/// POST /register  # create an account (public)
/// POST /token     # exchange credentials for an access token (public)
/// ```
///
/// Everything here is public by design: this service is where credentials
/// get turned into tokens, not where tokens get checked.
use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use notevault_shared::auth::token::TokenIssuer;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state, cloned per request via Axum's `State`
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Token issuer, constructed once from the shared trust configuration
    pub issuer: TokenIssuer,
}

impl AppState {
    /// Creates application state from a pool and loaded configuration
    pub fn new(db: PgPool, config: Config) -> Self {
        let issuer = TokenIssuer::new(config.token.clone());
        Self {
            db,
            config: Arc::new(config),
            issuer,
        }
    }
}

/// Builds the Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/register", post(routes::auth::register))
        .route("/token", post(routes::auth::login))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The browser frontend is served from a different origin in every
        // deployment of this stack; the services carry no cookies, so a
        // permissive policy is acceptable here.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
