use std::path::PathBuf;
use std::sync::Arc;

use airroute::{AirRouteConfig, BuildSession, logging, web};
use anyhow::{Context, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // optional config file path as the only argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AirRouteConfig::load_from_path(config_path)?;

    logging::init(&config.logging)?;
    tracing::info!("Starting AirRoute {}", airroute::VERSION);

    let session = BuildSession::from_config(&config).context("Failed to set up providers")?;

    web::run(&config.server, Arc::new(session)).await
}
