//! Coordinate to normalized air-quality reading

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::Result;
use crate::models::{AirQualityReading, AqiCategory, Coordinate};
use crate::providers::AirQualityProvider;

/// Measures air quality through whichever provider is configured
#[derive(Clone)]
pub struct AirQualityProbe {
    provider: Arc<dyn AirQualityProvider>,
}

impl AirQualityProbe {
    #[must_use]
    pub fn new(provider: Arc<dyn AirQualityProvider>) -> Self {
        Self { provider }
    }

    /// Fetch one reading. An index outside the expected range is clamped into a
    /// category, never rejected.
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn measure(&self, point: Coordinate) -> Result<AirQualityReading> {
        let observation = self.provider.observe(point).await?;
        let category = AqiCategory::from_level(observation.level);

        debug!(
            "Air quality at ({}): raw={:?} level={:?} -> {:?}",
            point.format_coordinates(),
            observation.raw_index,
            observation.level,
            category
        );

        Ok(AirQualityReading {
            raw_index: observation.raw_index,
            category,
        })
    }
}
