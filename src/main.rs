//! pathgate: path-routing reverse proxy with a static file fallback.
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!     Client Request     │  ┌────────┐    ┌──────────┐   prefix match   │
//!     ───────────────────┼─▶│  http  │───▶│ dispatch │──────────────────┼──▶ Backend
//!                        │  │ server │    │          │  (rewritten url) │
//!                        │  └────────┘    └────┬─────┘                  │
//!                        │                     │ no match               │
//!                        │                     ▼                        │
//!                        │              ┌─────────────┐                 │
//!                        │              │ static root │ or 404          │
//!                        │              └─────────────┘                 │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use pathgate::config::{load_config, resolve_bind_address, ProxyConfig};
use pathgate::lifecycle::signals::wait_for_termination;
use pathgate::observability::logging;
use pathgate::HttpServer;

#[derive(Parser)]
#[command(name = "pathgate")]
#[command(about = "Forward path prefixes to backends, serve everything else from disk", long_about = None)]
struct Cli {
    /// The configuration file (TOML). Without it the current directory is served.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)
            .map_err(|e| format!("Could not parse configuration {}: {}", path.display(), e))?,
        None => ProxyConfig::local_static(),
    };

    logging::init(&config.log_level)?;

    tracing::info!(
        bind_address = %resolve_bind_address(&config.addr),
        proxies = config.proxies.len(),
        static_dir = %config.static_dir,
        "Configuration loaded"
    );

    let server = Arc::new(HttpServer::new(config));

    let stopper = server.clone();
    tokio::spawn(async move {
        wait_for_termination().await;
        stopper.stop();
    });

    server.start().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
