//! ufund-api server binary
//!
//! Reads the YAML file named by `UFUND_CONFIG` (defaults otherwise) and
//! serves the REST API until Ctrl+C or SIGTERM.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use ufund::config::AppConfig;
use ufund::server::ServerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        "Starting {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    ServerBuilder::new(config).serve().await
}
