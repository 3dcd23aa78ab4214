//! Air-quality aggregation HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin aqd-server
//! ENGINE_CONFIG=./engine.toml PORT=9000 cargo run --bin aqd-server
//! ```
//!
//! # Environment Variables
//!
//! - `ENGINE_CONFIG`: Path to a TOML config file (default: `./engine.toml` when present)
//! - `HOST`: Server host (overrides config, default: 0.0.0.0)
//! - `PORT`: Server port (overrides config, default: 8080)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use aqd_rust::config::EngineConfig;
use aqd_rust::db::{DatasetRepository, LocalRepository};
use aqd_rust::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting air-quality aggregation server");

    let config = EngineConfig::load()?.with_env_overrides(|key| env::var(key).ok())?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let repository: Arc<dyn DatasetRepository> = Arc::new(LocalRepository::new());
    let state = AppState::new(repository, config);
    let app = create_router(state);

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
