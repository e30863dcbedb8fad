//! Configuration management for the `AirRoute` service
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::AirRouteError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `AirRoute` service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AirRouteConfig {
    /// OpenRouteService (geocoding and directions)
    pub openrouteservice: OpenRouteServiceConfig,
    /// Air-quality provider selection and credentials
    pub air_quality: AirQualityConfig,
    /// Outbound HTTP behaviour
    pub http: HttpConfig,
    /// Waypoint sampling
    pub sampling: SamplingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// HTTP server for the map front-end
    pub server: ServerConfig,
}

/// OpenRouteService configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenRouteServiceConfig {
    /// API key, sent in the `Authorization` header
    pub api_key: Option<String>,
    /// Base URL for the OpenRouteService API
    #[serde(default = "default_ors_base_url")]
    pub base_url: String,
}

/// Which air-quality provider backs the probe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AirQualityProviderKind {
    /// OpenWeather air pollution API (index 1-5)
    #[default]
    OpenWeather,
    /// World Air Quality Index project (US EPA AQI)
    Waqi,
}

/// Value shown to the user for OpenWeather readings
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RawMetric {
    /// The 1-5 index itself
    #[default]
    Aqi,
    /// PM10 concentration in μg/m³
    Pm10,
    /// PM2.5 concentration in μg/m³
    Pm2_5,
}

/// Air-quality provider configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirQualityConfig {
    #[serde(default)]
    pub provider: AirQualityProviderKind,
    /// Provider API key or token
    pub api_key: Option<String>,
    /// Base URL override; each provider has its own default
    pub base_url: Option<String>,
    /// Raw value displayed for OpenWeather readings
    #[serde(default)]
    pub raw_metric: RawMetric,
}

/// Outbound HTTP configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_seconds: u32,
    /// Upper bound for a whole build in seconds
    #[serde(default = "default_build_timeout")]
    pub build_timeout_seconds: u32,
    /// Waypoints fetched concurrently
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: u32,
    /// User agent sent to providers
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Waypoint sampling configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of waypoints measured along a route
    #[serde(default = "default_target_count")]
    pub target_count: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Directory holding the built map front-end
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

// Default value functions
fn default_ors_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_http_timeout() -> u32 {
    15
}

fn default_build_timeout() -> u32 {
    60
}

fn default_max_concurrent_requests() -> u32 {
    8
}

fn default_user_agent() -> String {
    format!("AirRoute/{}", crate::VERSION)
}

fn default_target_count() -> u32 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "frontend/dist".to_string()
}

impl Default for OpenRouteServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_ors_base_url(),
        }
    }
}

impl Default for AirQualityConfig {
    fn default() -> Self {
        Self {
            provider: AirQualityProviderKind::default(),
            api_key: None,
            base_url: None,
            raw_metric: RawMetric::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_http_timeout(),
            build_timeout_seconds: default_build_timeout(),
            max_concurrent_requests: default_max_concurrent_requests(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            target_count: default_target_count(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl AirRouteConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. AIRROUTE_AIR_QUALITY__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("AIRROUTE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: AirRouteConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("airroute").join("config.toml"))
    }

    /// Apply default values to zeroed or empty fields
    pub fn apply_defaults(&mut self) {
        if self.openrouteservice.base_url.is_empty() {
            self.openrouteservice.base_url = default_ors_base_url();
        }
        if self.http.timeout_seconds == 0 {
            self.http.timeout_seconds = default_http_timeout();
        }
        if self.http.build_timeout_seconds == 0 {
            self.http.build_timeout_seconds = default_build_timeout();
        }
        if self.http.max_concurrent_requests == 0 {
            self.http.max_concurrent_requests = default_max_concurrent_requests();
        }
        if self.http.user_agent.is_empty() {
            self.http.user_agent = default_user_agent();
        }
        if self.sampling.target_count == 0 {
            self.sampling.target_count = default_target_count();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.static_dir.is_empty() {
            self.server.static_dir = default_static_dir();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate credentials that are present. Absent ones are reported when the
    /// provider clients are built.
    pub fn validate_api_keys(&self) -> Result<()> {
        let keys = [
            ("OpenRouteService", &self.openrouteservice.api_key),
            ("Air-quality provider", &self.air_quality.api_key),
        ];
        for (name, key) in keys {
            if let Some(key) = key {
                if key.trim().is_empty() {
                    return Err(AirRouteError::config(format!(
                        "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds > 300 {
            return Err(AirRouteError::config("HTTP timeout cannot exceed 300 seconds").into());
        }

        if self.http.build_timeout_seconds > 600 {
            return Err(AirRouteError::config("Build timeout cannot exceed 600 seconds").into());
        }

        if !(1..=64).contains(&self.http.max_concurrent_requests) {
            return Err(AirRouteError::config(
                "Concurrent requests must be between 1 and 64",
            )
            .into());
        }

        if !(1..=100).contains(&self.sampling.target_count) {
            return Err(AirRouteError::config(
                "Sampling target count must be between 1 and 100",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(AirRouteError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(AirRouteError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = std::iter::once(&self.openrouteservice.base_url)
            .chain(self.air_quality.base_url.as_ref());
        for url in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(AirRouteError::config(format!(
                    "Base URL '{url}' must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
