//! Two coordinates to a routed path with distance and duration

use std::sync::Arc;

use tracing::{info, instrument};

use crate::models::{Coordinate, RouteResult, TransportMode};
use crate::providers::RouteProvider;
use crate::{AirRouteError, Result};

const SERVICE: &str = "router";

/// Plans routes and normalizes provider units
#[derive(Clone)]
pub struct RoutePlanner {
    router: Arc<dyn RouteProvider>,
}

impl RoutePlanner {
    #[must_use]
    pub fn new(router: Arc<dyn RouteProvider>) -> Self {
        Self { router }
    }

    /// Plan a route; distance comes back in km and duration in minutes
    #[instrument(skip(self))]
    pub async fn plan(
        &self,
        start: Coordinate,
        end: Coordinate,
        mode: TransportMode,
    ) -> Result<RouteResult> {
        let route = self
            .router
            .directions(start, end, mode)
            .await?
            .ok_or_else(|| {
                AirRouteError::no_route(format!(
                    "no path between ({}) and ({})",
                    start.format_coordinates(),
                    end.format_coordinates()
                ))
            })?;

        if route.path.len() < 2 {
            return Err(AirRouteError::no_route(format!(
                "provider returned a path with {} point(s)",
                route.path.len()
            )));
        }

        let valid = |value: f64| value.is_finite() && value >= 0.0;
        if !valid(route.distance_m) || !valid(route.duration_s) {
            return Err(AirRouteError::upstream(
                SERVICE,
                format!(
                    "invalid route summary: distance={} duration={}",
                    route.distance_m, route.duration_s
                ),
            ));
        }

        let result =
            RouteResult::from_provider_units(route.path, route.distance_m, route.duration_s);
        info!(
            "Planned route with {} points: {:.2} km, {:.2} min",
            result.path.len(),
            result.distance_km,
            result.duration_min
        );
        Ok(result)
    }
}
