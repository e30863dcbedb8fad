//! OpenRouteService client: forward geocoding, reverse geocoding and directions

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::{Geocoder, ProviderRoute, RouteProvider, http};
use crate::config::OpenRouteServiceConfig;
use crate::models::{Coordinate, TransportMode};
use crate::{AirRouteError, Result};

const SERVICE: &str = "openrouteservice";

/// OpenRouteService API client
pub struct OpenRouteServiceClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenRouteServiceClient {
    /// Create a new client. Fails when no API key is configured.
    pub fn new(config: &OpenRouteServiceConfig, client: Client) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            AirRouteError::config(
                "Missing OpenRouteService API key (set AIRROUTE_OPENROUTESERVICE__API_KEY)",
            )
        })?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", self.api_key.as_str())
    }
}

#[async_trait]
impl Geocoder for OpenRouteServiceClient {
    #[instrument(skip(self))]
    async fn search(&self, text: &str) -> Result<Vec<Coordinate>> {
        let request = self.get("/geocode/search").query(&[("text", text)]);
        let response: PointCollection = http::get_json(SERVICE, request).await?;

        let candidates = parse_search(response)?;
        debug!("Found {} geocoding candidates for '{}'", candidates.len(), text);
        Ok(candidates)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, point: Coordinate) -> Result<Vec<String>> {
        let request = self.get("/geocode/reverse").query(&[
            ("point.lat", point.latitude()),
            ("point.lon", point.longitude()),
        ]);
        let response: LabelCollection = http::get_json(SERVICE, request).await?;

        Ok(parse_reverse(response))
    }
}

#[async_trait]
impl RouteProvider for OpenRouteServiceClient {
    #[instrument(skip(self))]
    async fn directions(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TransportMode,
    ) -> Result<Option<ProviderRoute>> {
        let request = self
            .get(&format!("/v2/directions/{}", mode.profile()))
            .query(&[
                ("start", start.to_lon_lat_param()),
                ("end", end.to_lon_lat_param()),
            ]);

        let response = http::send(SERVICE, request).await?;

        // ORS answers 404 when a point cannot be snapped to the road network
        if response.status() == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            warn!("No routable path reported by {}: {}", SERVICE, body);
            return Ok(None);
        }

        let response = http::ensure_success(SERVICE, response).await?;
        let collection: RouteCollection = http::decode_json(SERVICE, response).await?;

        parse_directions(collection)
    }
}

/// Forward geocoding response
#[derive(Debug, Deserialize)]
pub(crate) struct PointCollection {
    #[serde(default)]
    features: Vec<PointFeature>,
}

#[derive(Debug, Deserialize)]
struct PointFeature {
    geometry: PointGeometry,
}

#[derive(Debug, Deserialize)]
struct PointGeometry {
    /// `[lon, lat]`
    coordinates: Vec<f64>,
}

/// Reverse geocoding response
#[derive(Debug, Deserialize)]
pub(crate) struct LabelCollection {
    #[serde(default)]
    features: Vec<LabelFeature>,
}

#[derive(Debug, Deserialize)]
struct LabelFeature {
    #[serde(default)]
    properties: LabelProperties,
}

#[derive(Debug, Deserialize, Default)]
struct LabelProperties {
    label: Option<String>,
}

/// Directions response (GeoJSON)
#[derive(Debug, Deserialize)]
pub(crate) struct RouteCollection {
    #[serde(default)]
    features: Vec<RouteFeature>,
}

#[derive(Debug, Deserialize)]
struct RouteFeature {
    geometry: LineGeometry,
    #[serde(default)]
    properties: RouteProperties,
}

#[derive(Debug, Deserialize)]
struct LineGeometry {
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize, Default)]
struct RouteProperties {
    #[serde(default)]
    segments: Vec<RouteSummary>,
    summary: Option<RouteSummary>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
struct RouteSummary {
    /// Meters
    #[serde(default)]
    distance: f64,
    /// Seconds
    #[serde(default)]
    duration: f64,
}

pub(crate) fn parse_search(collection: PointCollection) -> Result<Vec<Coordinate>> {
    collection
        .features
        .iter()
        .map(|feature| Coordinate::from_lon_lat(&feature.geometry.coordinates, SERVICE))
        .collect()
}

pub(crate) fn parse_reverse(collection: LabelCollection) -> Vec<String> {
    collection
        .features
        .into_iter()
        .filter_map(|feature| feature.properties.label)
        .filter(|label| !label.trim().is_empty())
        .collect()
}

pub(crate) fn parse_directions(collection: RouteCollection) -> Result<Option<ProviderRoute>> {
    let Some(feature) = collection.features.into_iter().next() else {
        return Ok(None);
    };

    let summary = feature
        .properties
        .segments
        .first()
        .copied()
        .or(feature.properties.summary)
        .ok_or_else(|| AirRouteError::upstream(SERVICE, "route has no distance/duration summary"))?;

    let path = feature
        .geometry
        .coordinates
        .iter()
        .map(|position| Coordinate::from_lon_lat(position, SERVICE))
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(ProviderRoute {
        path,
        distance_m: summary.distance,
        duration_s: summary.duration,
    }))
}
