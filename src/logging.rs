//! Tracing subscriber setup driven by [`LoggingConfig`]

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(config)))
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .context("Failed to install JSON log subscriber")?;
    } else {
        registry
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to install log subscriber")?;
    }

    Ok(())
}

/// Our own crate logs at the configured level, dependencies one notch quieter.
fn filter_directive(config: &LoggingConfig) -> String {
    let dependencies = match config.level.as_str() {
        "trace" | "debug" => "info",
        "info" => "warn",
        other => other,
    };
    format!("{dependencies},airroute={},tower_http={}", config.level, config.level)
}
