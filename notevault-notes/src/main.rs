//! # Notevault Notes Service
//!
//! Binary entry point: loads configuration, connects the database pool, and
//! serves the notes API behind bearer verification.
//!
//! ```bash
//! cargo run -p notevault-notes
//! ```

use notevault_notes::{app, config::Config};
use notevault_shared::db::pool::create_pool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notevault_notes=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Notevault notes service v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let pool = create_pool(config.database.clone()).await?;

    let bind_address = config.bind_address();
    let state = app::AppState::new(pool, config);
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("listening on http://{}", bind_address);

    axum::serve(listener, router).await?;

    Ok(())
}
