//! OpenWeather air pollution client
//!
//! OpenWeather already reports a 1-5 index, so the canonical level is taken as is.
//! The displayed raw value is either that index or a pollutant concentration,
//! depending on [`RawMetric`].

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use super::{AirQualityProvider, http};
use crate::config::{AirQualityConfig, RawMetric};
use crate::models::{AirQualityObservation, Coordinate};
use crate::{AirRouteError, Result};

const SERVICE: &str = "openweather";
const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// OpenWeather air pollution API client
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
    raw_metric: RawMetric,
}

impl OpenWeatherClient {
    /// Create a new client. Fails when no API key is configured.
    pub fn new(config: &AirQualityConfig, client: Client) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AirRouteError::config(
                "Missing OpenWeather API key (set AIRROUTE_AIR_QUALITY__API_KEY)",
            )
        })?;

        Ok(Self {
            client,
            api_key,
            base_url: config
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            raw_metric: config.raw_metric,
        })
    }
}

#[async_trait]
impl AirQualityProvider for OpenWeatherClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    #[instrument(skip(self))]
    async fn observe(&self, point: Coordinate) -> Result<AirQualityObservation> {
        let request = self
            .client
            .get(format!("{}/data/2.5/air_pollution", self.base_url))
            .query(&[
                ("lat", point.latitude().to_string()),
                ("lon", point.longitude().to_string()),
                ("appid", self.api_key.clone()),
            ]);

        let response: AirPollutionResponse = http::get_json(SERVICE, request).await?;
        Ok(parse_observation(response, self.raw_metric))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirPollutionResponse {
    #[serde(default)]
    list: Vec<AirPollutionEntry>,
}

#[derive(Debug, Deserialize)]
struct AirPollutionEntry {
    main: Option<MainIndex>,
    #[serde(default)]
    components: Components,
}

#[derive(Debug, Deserialize)]
struct MainIndex {
    aqi: Option<f64>,
}

/// Pollutant concentrations in μg/m³
#[derive(Debug, Deserialize, Default)]
struct Components {
    pm10: Option<f64>,
    pm2_5: Option<f64>,
}

pub(crate) fn parse_observation(
    response: AirPollutionResponse,
    raw_metric: RawMetric,
) -> AirQualityObservation {
    let Some(entry) = response.list.into_iter().next() else {
        return AirQualityObservation::default();
    };

    let level = entry.main.and_then(|main| main.aqi);
    let raw_index = match raw_metric {
        RawMetric::Aqi => level,
        RawMetric::Pm10 => entry.components.pm10,
        RawMetric::Pm2_5 => entry.components.pm2_5,
    };

    AirQualityObservation { raw_index, level }
}
