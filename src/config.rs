use anyhow::{Context, Result};
use std::net::SocketAddr;

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let bind_addr =
            std::env::var("QUOTE_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        Ok(Config {
            bind_addr: bind_addr.parse::<SocketAddr>().with_context(|| {
                format!("QUOTE_BIND_ADDR '{bind_addr}' is not a valid socket address")
            })?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
