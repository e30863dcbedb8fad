//! Air-quality models: canonical category, provider observation and per-waypoint sample

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Canonical five-level classification, independent of any provider scale
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum AqiCategory {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
    Unknown,
}

impl AqiCategory {
    /// Categories ordered by level 1..=5
    pub const LEVELS: [AqiCategory; 5] = [
        AqiCategory::Good,
        AqiCategory::Fair,
        AqiCategory::Moderate,
        AqiCategory::Poor,
        AqiCategory::VeryPoor,
    ];

    /// Map a level on the canonical 1-5 scale to a category.
    ///
    /// Out-of-range levels are clamped into 1-5; only a missing or non-finite
    /// level yields `Unknown`.
    #[must_use]
    pub fn from_level(level: Option<f64>) -> Self {
        match level {
            Some(level) if level.is_finite() => {
                let index = (level.round() - 1.0).clamp(0.0, 4.0) as usize;
                Self::LEVELS[index]
            }
            _ => AqiCategory::Unknown,
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Fair => "Fair",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::Poor => "Poor",
            AqiCategory::VeryPoor => "Very Poor",
            AqiCategory::Unknown => "Unknown",
        }
    }
}

/// What an air-quality provider reports for one point
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AirQualityObservation {
    /// Value on the provider's own scale, shown to the user
    pub raw_index: Option<f64>,
    /// The same reading expressed on the canonical 1-5 scale
    pub level: Option<f64>,
}

/// Normalized reading produced by the probe
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct AirQualityReading {
    pub raw_index: Option<f64>,
    pub category: AqiCategory,
}

/// One measured waypoint along the route
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AirQualitySample {
    pub coordinate: Coordinate,
    /// Provider-scale value, `None` when the provider had no reading
    pub raw_index: Option<f64>,
    pub category: AqiCategory,
    pub place_label: String,
}

impl AirQualitySample {
    /// Combine the sub-results fetched for the same coordinate
    #[must_use]
    pub fn new(coordinate: Coordinate, reading: AirQualityReading, place_label: String) -> Self {
        Self {
            coordinate,
            raw_index: reading.raw_index,
            category: reading.category,
            place_label,
        }
    }

    /// Format the raw value for display
    #[must_use]
    pub fn format_raw_index(&self) -> String {
        self.raw_index
            .map_or_else(|| "N/A".to_string(), |value| value.to_string())
    }
}
