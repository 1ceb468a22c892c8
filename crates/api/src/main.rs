//! PSNLink - HTTP facade over the PlayStation Network private API
//!
//! Main entry point for the server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use psnlink_api::utils::logging::init_tracing;
use psnlink_api::{build_router, AppContext};
use psnlink_infra::config;
use tokio::net::TcpListener;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Environment first so RUST_LOG / PSNLINK_LOG_FORMAT from .env apply
    let dotenv = dotenvy::dotenv();
    init_tracing();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(err) => debug!(error = %err, "no .env file loaded"),
    }

    let config = config::load().context("failed to load configuration")?;
    let port = config.server.port;

    let ctx = Arc::new(AppContext::new(config).context("failed to initialize application")?);
    ctx.bootstrap_session().await;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await.with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "PSN API server listening");

    axum::serve(listener, build_router(ctx)).await.context("server error")?;
    Ok(())
}
