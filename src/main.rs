//! Demo server for composable route trees.
//!
//! Loads a TOML configuration, mounts the selected demo tree behind the
//! server-wide trace and timeout middlewares, and serves it until SIGINT or
//! SIGTERM.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use routetree::config::load_or_default;
use routetree::observability::logging;
use routetree::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "routetree")]
#[command(about = "Serve a demo route tree", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init(&config.observability)?;

    tracing::info!("routetree v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        demo = ?config.routes.demo,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Arc::new(Shutdown::new());
    shutdown.clone().listen_for_signals();

    let server = HttpServer::new(config);
    server.run(listener, shutdown).await?;

    tracing::info!("routetree stopped");
    Ok(())
}
