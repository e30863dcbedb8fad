//! Route model: transport mode and the normalized planning result

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Supported transport modes. Only driving is offered today.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Driving,
}

impl TransportMode {
    /// Routing profile name understood by OpenRouteService
    #[must_use]
    pub fn profile(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving-car",
        }
    }
}

/// A planned route with distance and duration in display units
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteResult {
    /// Ordered path from start to end, at least two points
    pub path: Vec<Coordinate>,
    /// Distance in kilometers, rounded to 2 decimals
    pub distance_km: f64,
    /// Duration in minutes, rounded to 2 decimals
    pub duration_min: f64,
}

impl RouteResult {
    /// Normalize provider-native units (meters, seconds) to km and minutes
    #[must_use]
    pub fn from_provider_units(path: Vec<Coordinate>, distance_m: f64, duration_s: f64) -> Self {
        Self {
            path,
            distance_km: round2(distance_m / 1000.0),
            duration_min: round2(duration_s / 60.0),
        }
    }

    #[must_use]
    pub fn start(&self) -> Option<&Coordinate> {
        self.path.first()
    }

    #[must_use]
    pub fn end(&self) -> Option<&Coordinate> {
        self.path.last()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
