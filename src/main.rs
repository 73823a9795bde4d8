// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use envlog_annotator::config::Config;
use envlog_annotator::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting envlog-annotator");

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: listen_addr={}, default_settings={}",
        config.listen_addr,
        config.default_settings.is_some()
    );

    server::run(config).await?;

    info!("envlog-annotator stopped");
    Ok(())
}
