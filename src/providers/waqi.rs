//! World Air Quality Index (aqicn.org) client
//!
//! WAQI reports the US EPA AQI (0-500). The canonical level comes from the EPA
//! category breakpoints; the EPA number itself is kept as the raw value.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;

use super::{AirQualityProvider, http};
use crate::config::AirQualityConfig;
use crate::models::{AirQualityObservation, Coordinate};
use crate::{AirRouteError, Result};

const SERVICE: &str = "waqi";
const DEFAULT_BASE_URL: &str = "https://api.waqi.info";

/// WAQI geo feed client
pub struct WaqiClient {
    client: Client,
    token: String,
    base_url: String,
}

impl WaqiClient {
    /// Create a new client. Fails when no token is configured.
    pub fn new(config: &AirQualityConfig, client: Client) -> Result<Self> {
        let token = config.api_key.clone().ok_or_else(|| {
            AirRouteError::config("Missing WAQI token (set AIRROUTE_AIR_QUALITY__API_KEY)")
        })?;

        Ok(Self {
            client,
            token,
            base_url: config
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
        })
    }
}

#[async_trait]
impl AirQualityProvider for WaqiClient {
    fn name(&self) -> &'static str {
        SERVICE
    }

    #[instrument(skip(self))]
    async fn observe(&self, point: Coordinate) -> Result<AirQualityObservation> {
        let request = self
            .client
            .get(format!(
                "{}/feed/geo:{};{}/",
                self.base_url, point.latitude(), point.longitude()
            ))
            .query(&[("token", self.token.as_str())]);

        let response: FeedResponse = http::get_json(SERVICE, request).await?;
        parse_feed(response)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedResponse {
    status: String,
    #[serde(default)]
    data: Value,
}

pub(crate) fn parse_feed(response: FeedResponse) -> Result<AirQualityObservation> {
    if response.status != "ok" {
        // on errors `data` carries the message, e.g. "Invalid key"
        let message = response.data.as_str().unwrap_or("unknown error");
        return Err(AirRouteError::upstream(
            SERVICE,
            format!("status {}: {}", response.status, message),
        ));
    }

    // stations without a current reading report "-"
    let raw_index = response.data.get("aqi").and_then(Value::as_f64);

    Ok(AirQualityObservation {
        raw_index,
        level: raw_index.map(epa_level),
    })
}

/// US EPA AQI breakpoints folded onto the 1-5 scale
pub(crate) fn epa_level(aqi: f64) -> f64 {
    match aqi {
        a if a <= 50.0 => 1.0,
        a if a <= 100.0 => 2.0,
        a if a <= 150.0 => 3.0,
        a if a <= 200.0 => 4.0,
        _ => 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(50.0, 1.0)]
    #[case(51.0, 2.0)]
    #[case(150.0, 3.0)]
    #[case(175.0, 4.0)]
    #[case(320.0, 5.0)]
    fn test_epa_level(#[case] aqi: f64, #[case] expected: f64) {
        assert_eq!(epa_level(aqi), expected);
    }

    #[test]
    fn test_parse_feed() {
        let response: FeedResponse = serde_json::from_value(json!({
            "status": "ok",
            "data": { "aqi": 168, "city": { "geo": [28.7, 77.1], "name": "Delhi" } }
        }))
        .unwrap();

        let observation = parse_feed(response).unwrap();
        assert_eq!(observation.raw_index, Some(168.0));
        assert_eq!(observation.level, Some(4.0));
    }

    #[test]
    fn test_parse_feed_without_reading() {
        let response: FeedResponse = serde_json::from_value(json!({
            "status": "ok",
            "data": { "aqi": "-" }
        }))
        .unwrap();

        assert_eq!(parse_feed(response).unwrap(), AirQualityObservation::default());
    }

    #[test]
    fn test_parse_feed_error_status() {
        let response: FeedResponse = serde_json::from_value(json!({
            "status": "error",
            "data": "Invalid key"
        }))
        .unwrap();

        let err = parse_feed(response).unwrap_err();
        assert!(err.to_string().contains("Invalid key"));
    }
}
