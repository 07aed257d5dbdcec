//! Entry point for the Quote Engine binary.
//!
//! Running this binary starts an HTTP server that exposes the quote
//! calculator.  The bind address is read from `QUOTE_BIND_ADDR`
//! (default `127.0.0.1:3000`) and log filtering from `RUST_LOG`; both
//! may also be set in a `.env` file.

use anyhow::Result;
use quote_engine::config::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Quote Engine v{}", env!("CARGO_PKG_VERSION"));

    quote_engine::api::serve(&config).await
}
