/// Application state and router builder for the notes service
///
/// # Routes
///
/// ```text
/// GET    /health          # public
/// POST   /notes           # create (bearer required)
/// GET    /notes           # list own notes (bearer required)
/// GET    /notes/:id       # fetch own note (bearer required)
/// PUT    /notes/:id       # update own note (bearer required)
/// DELETE /notes/:id       # delete own note (bearer required)
/// ```
///
/// The bearer layer is the shared [`require_bearer`] middleware; a request
/// that reaches a notes handler has already had its token verified and
/// carries the subject in an `AuthContext` extension.
use crate::config::Config;
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use notevault_shared::{
    auth::{middleware::require_bearer, token::TokenVerifier},
    storage::ObjectStore,
};
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

    /// Token verifier, constructed once from the shared trust configuration
    pub verifier: TokenVerifier,

    /// Object storage backend for note content. None in the current
    /// deployment: content is stored inline in the database and this
    /// collaborator stays dormant.
    pub storage: Option<Arc<dyn ObjectStore>>,
}

impl AppState {
    /// Creates application state from a pool and loaded configuration
    pub fn new(db: PgPool, config: Config) -> Self {
        let verifier = TokenVerifier::new(config.token.clone());
        Self {
            db,
            config: Arc::new(config),
            verifier,
            storage: None,
        }
    }
}

/// Builds the Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let note_routes = Router::new()
        .route("/notes", post(routes::notes::create_note))
        .route("/notes", get(routes::notes::list_notes))
        .route("/notes/:id", get(routes::notes::get_note))
        .route("/notes/:id", put(routes::notes::update_note))
        .route("/notes/:id", delete(routes::notes::delete_note))
        .layer(middleware::from_fn(require_bearer(state.verifier.clone())));

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(note_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
