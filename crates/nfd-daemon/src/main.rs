//! NFD Daemon - Network function dispatcher
//!
//! Accepts VNF lifecycle events over REST and orchestrates deployment or
//! removal of the associated services on the workflow-execution backend,
//! keeping the service registry consistent with the backend's state.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod config;
mod error;
mod server;

use config::DaemonConfig;
use error::{DaemonError, DaemonResult};
use server::Server;

/// NFD Daemon CLI
#[derive(Parser)]
#[command(name = "nfdd")]
#[command(about = "NFD Daemon - Network function dispatcher", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "NFD_CONFIG")]
    config: Option<String>,

    /// Listen address
    #[arg(short, long, env = "NFD_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "NFD_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "NFD_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.log_level.clone().into());

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        "starting NFD dispatcher"
    );

    // Create and run server
    let server = Server::new(config)?;
    server.run().await
}
