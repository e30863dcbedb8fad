//! Orchestrates geocoding, routing, sampling and per-waypoint measurement
//! into one [`RouteAirQualityReport`].

use chrono::Utc;
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, info, instrument};

use super::{AirQualityProbe, GeocodeResolver, PlaceNameResolver, RoutePlanner, WaypointSampler};
use crate::config::AirRouteConfig;
use crate::models::{
    AirQualitySample, BuildRequest, Coordinate, RouteAirQualityReport, TransportMode,
};
use crate::providers::Providers;
use crate::Result;

/// Builds route air-quality reports. Holds no display state.
#[derive(Clone)]
pub struct RouteAirQualityAggregator {
    geocode: GeocodeResolver,
    planner: RoutePlanner,
    sampler: WaypointSampler,
    probe: AirQualityProbe,
    place_names: PlaceNameResolver,
    max_concurrent_requests: usize,
}

impl RouteAirQualityAggregator {
    /// Wire the pipeline components to a set of providers
    #[must_use]
    pub fn new(
        providers: Providers,
        sampler: WaypointSampler,
        max_concurrent_requests: usize,
    ) -> Self {
        Self {
            geocode: GeocodeResolver::new(providers.geocoder.clone()),
            planner: RoutePlanner::new(providers.router),
            sampler,
            probe: AirQualityProbe::new(providers.air_quality),
            place_names: PlaceNameResolver::new(providers.geocoder),
            max_concurrent_requests: max_concurrent_requests.max(1),
        }
    }

    /// Build the HTTP-backed pipeline described by `config`
    pub fn from_config(config: &AirRouteConfig) -> Result<Self> {
        let providers = Providers::from_config(config)?;
        let sampler = WaypointSampler::new(config.sampling.target_count as usize)?;
        Ok(Self::new(
            providers,
            sampler,
            config.http.max_concurrent_requests as usize,
        ))
    }

    #[must_use]
    pub fn sampler(&self) -> &WaypointSampler {
        &self.sampler
    }

    /// Run one complete build. Stages run strictly in order (geocode, route,
    /// sample, per-waypoint fetch) and the first failure aborts the whole build;
    /// partial reports are never returned.
    #[instrument(skip(self))]
    pub async fn build(
        &self,
        start_text: &str,
        end_text: &str,
        mode: TransportMode,
    ) -> Result<RouteAirQualityReport> {
        let request = BuildRequest::new(start_text.trim(), end_text.trim(), mode);
        request.validate()?;

        let (start, end) = tokio::try_join!(
            self.geocode.resolve(&request.start),
            self.geocode.resolve(&request.end)
        )?;

        let route = self.planner.plan(start, end, mode).await?;

        let waypoints = self.sampler.sample(&route.path);
        debug!(
            "Sampled {} of {} path points (stride {})",
            waypoints.len(),
            route.path.len(),
            self.sampler.stride(route.path.len())
        );

        // `buffered` keeps the results in waypoint order
        let samples: Vec<AirQualitySample> = stream::iter(waypoints)
            .map(|point| self.measure_waypoint(point))
            .buffered(self.max_concurrent_requests)
            .try_collect()
            .await?;

        info!(
            "Built report for '{}' -> '{}' with {} samples",
            request.start,
            request.end,
            samples.len()
        );

        Ok(RouteAirQualityReport {
            request,
            route,
            samples,
            generated_at: Utc::now(),
        })
    }

    /// Air quality and place name for one waypoint, fetched concurrently
    async fn measure_waypoint(&self, point: Coordinate) -> Result<AirQualitySample> {
        let (reading, place_label) =
            tokio::try_join!(self.probe.measure(point), self.place_names.lookup(point))?;

        Ok(AirQualitySample::new(point, reading, place_label))
    }
}
