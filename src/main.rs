//! Template Router server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request    ┌─────────┐    ┌──────────────┐    ┌──────────────┐
//!     ─────────────────▶│  http   │───▶│   routing    │───▶│   handler    │
//!                       │ server  │    │ exact → scan │    │   factory    │
//!                       └─────────┘    └──────────────┘    └──────┬───────┘
//!     Client Response                                             │
//!     ◀───────────────────────────────────────────────────────────┘
//!
//!     Cross-cutting: config (TOML) · observability (tracing) · lifecycle
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use template_router::config::{load_config, ServerConfig};
use template_router::lifecycle::Shutdown;
use template_router::observability::logging::init_logging;
use template_router::HttpServer;

#[derive(Parser)]
#[command(name = "template-router")]
#[command(about = "Serve static routes matched by path templates", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    if cli.check {
        println!("configuration OK ({} routes)", config.routes.len());
        return Ok(());
    }

    init_logging(&config.observability)?;
    tracing::info!("template-router v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::from_config(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
