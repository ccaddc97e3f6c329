//! roster-server: HTTP service exposing the roster-core duty-roster solver.
//!
//! Configuration is read straight from environment variables at startup —
//! there is no dedicated config crate, since the full set of knobs is small
//! and flat (bind address, time limit, penalty-weight overrides).

mod config;
mod routes;

use config::ServerConfig;
use routes::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(?config, "starting roster-server");

    let state = Arc::new(AppState::new(config.default_settings.clone(), config.senior_default_settings.clone()));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
