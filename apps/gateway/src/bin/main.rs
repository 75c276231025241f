//! IdeaForge gateway binary entry point.
//!
//! Initializes tracing, binds the axum server, and serves until
//! ctrl-c.

use anyhow::Result;
use ideaforge_gateway::{AppState, router};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let bind = std::env::var("IDEAFORGE_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let app = router(AppState::new());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("gateway listening on {bind}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            tracing::info!("received shutdown signal");
        })
        .await?;
    Ok(())
}
