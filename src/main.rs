//! Product Catalog API
//!
//! A small JSON API over an in-memory product collection, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ TraceLayer / request ID ─▶ catch panic ─▶ timeout ─▶ body limit
//!                                                                             │
//!                          ┌──────────────────────────────────────────────────┘
//!                          ▼
//!                   ┌─────────────┐   /products*   ┌───────────┐    ┌────────────────┐
//!                   │   router    │───────────────▶│ auth gate │───▶│    handlers    │
//!                   └─────────────┘                └───────────┘    └───────┬────────┘
//!                          │ /                                              │
//!                          ▼                                                ▼
//!                      welcome                              validation → store / query
//! ```

use std::path::PathBuf;

use clap::Parser;

use product_api::config::resolve_config;
use product_api::lifecycle::{self, signals};
use product_api::observability::init_logging;

#[derive(Parser)]
#[command(name = "product-api")]
#[command(about = "In-memory product catalog HTTP API", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "PRODUCT_API_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    init_logging(&config.observability);

    tracing::info!("product-api v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth_header = %config.auth.header_name,
        default_limit = config.pagination.default_limit,
        request_timeout_secs = config.timeouts.request_secs,
        seed = config.seed.enabled,
        "Configuration loaded"
    );

    let server = lifecycle::start(config).await?;
    signals::spawn_signal_listener(server.shutdown_handle());

    server.wait().await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
