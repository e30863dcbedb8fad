//! Upstream providers
//!
//! The pipeline only talks to the traits defined here:
//! - `Geocoder`: forward (text to coordinates) and reverse (coordinate to labels)
//! - `RouteProvider`: driving directions between two coordinates
//! - `AirQualityProvider`: an air-quality observation for one coordinate
//!
//! Concrete HTTP clients live in the submodules and are picked from configuration.

pub mod http;
pub mod openrouteservice;
pub mod openweather;
pub mod waqi;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::Result;
use crate::config::{AirQualityProviderKind, AirRouteConfig};
use crate::models::{AirQualityObservation, Coordinate, TransportMode};

pub use openrouteservice::OpenRouteServiceClient;
pub use openweather::OpenWeatherClient;
pub use waqi::WaqiClient;

/// Forward and reverse geocoding
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Candidates for a free-text location, best first
    async fn search(&self, text: &str) -> Result<Vec<Coordinate>>;

    /// Display labels for a coordinate, best first
    async fn reverse(&self, point: Coordinate) -> Result<Vec<String>>;
}

/// A route in provider-native units
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRoute {
    pub path: Vec<Coordinate>,
    pub distance_m: f64,
    pub duration_s: f64,
}

/// Directions between two coordinates
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// `Ok(None)` when the provider reports that no route exists
    async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TransportMode,
    ) -> Result<Option<ProviderRoute>>;
}

/// Air-quality observations
#[async_trait]
pub trait AirQualityProvider: Send + Sync {
    /// Short provider name for logs
    fn name(&self) -> &'static str;

    async fn observe(&self, point: Coordinate) -> Result<AirQualityObservation>;
}

/// The set of providers a build runs against
#[derive(Clone)]
pub struct Providers {
    pub geocoder: Arc<dyn Geocoder>,
    pub router: Arc<dyn RouteProvider>,
    pub air_quality: Arc<dyn AirQualityProvider>,
}

impl Providers {
    /// Build the HTTP-backed providers selected in `config`
    pub fn from_config(config: &AirRouteConfig) -> Result<Self> {
        let client = http::build_client(&config.http)?;

        let ors = Arc::new(OpenRouteServiceClient::new(
            &config.openrouteservice,
            client.clone(),
        )?);

        let air_quality: Arc<dyn AirQualityProvider> = match config.air_quality.provider {
            AirQualityProviderKind::OpenWeather => {
                Arc::new(OpenWeatherClient::new(&config.air_quality, client)?)
            }
            AirQualityProviderKind::Waqi => Arc::new(WaqiClient::new(&config.air_quality, client)?),
        };

        info!("Using air-quality provider: {}", air_quality.name());

        Ok(Self {
            geocoder: ors.clone(),
            router: ors,
            air_quality,
        })
    }
}
