//! Build request and the terminal report handed to the rendering side

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AirQualitySample, RouteResult, TransportMode};
use crate::{AirRouteError, Result};

/// User input for one build
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BuildRequest {
    /// Missing text deserializes as empty and is rejected by validation
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub mode: TransportMode,
}

impl BuildRequest {
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>, mode: TransportMode) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            mode,
        }
    }

    /// Both locations must contain non-blank text
    pub fn validate(&self) -> Result<()> {
        if self.start.trim().is_empty() || self.end.trim().is_empty() {
            return Err(AirRouteError::validation(
                "Both start and end locations are required",
            ));
        }
        Ok(())
    }
}

/// Route summary plus ordered air-quality samples
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RouteAirQualityReport {
    /// The inputs this report was built from
    pub request: BuildRequest,
    pub route: RouteResult,
    /// One sample per sampled waypoint, in traversal order
    pub samples: Vec<AirQualitySample>,
    pub generated_at: DateTime<Utc>,
}
