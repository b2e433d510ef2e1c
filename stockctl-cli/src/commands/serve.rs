//! HTTP server command
//!
//! Runs the quick-add web page and JSON endpoints over the same store the
//! CLI uses.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use stockctl_core::PgRepository;
use stockctl_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Skip the CREATE TABLE IF NOT EXISTS bootstrap at startup
    #[arg(long)]
    pub no_init: bool,
}

/// Run the HTTP server (blocks until shutdown)
pub async fn run_serve(repo: PgRepository, args: ServeArgs) -> Result<()> {
    if !args.no_init {
        repo.ensure_schema()
            .await
            .context("Failed to create schema")?;
    }

    tracing::info!("Starting stockctl server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
    };
    run_server(AppState::new(Arc::new(repo)), config)
        .await
        .context("Server error")?;

    Ok(())
}
