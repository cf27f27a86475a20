//! Binary crate for the `weather` server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - The HTTP surface and its HTML pages

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod page;
mod web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,weather_core=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
