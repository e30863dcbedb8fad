//! Typed display model for the map front-end
//!
//! The rendering side owns all markup; this module only decides what is shown:
//! the route line, one marker per sample with its popup text, and the route and
//! air-quality summaries.

use serde::Serialize;

use crate::models::{AirQualitySample, RouteAirQualityReport};

/// A `[latitude, longitude]` pair, the order map widgets expect
pub type LatLng = [f64; 2];

/// Everything the map page needs to draw one report
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapView {
    pub route_line: Vec<LatLng>,
    pub markers: Vec<MapMarker>,
    pub route_info: RouteInfo,
    pub air_quality: AirQualitySummary,
}

/// A marker placed on a sampled waypoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMarker {
    pub position: LatLng,
    pub popup: Popup,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Popup {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteInfo {
    pub distance_km: f64,
    pub duration_min: f64,
    pub distance_text: String,
    pub duration_text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AirQualitySummary {
    pub heading: String,
    pub lines: Vec<String>,
}

impl MapView {
    #[must_use]
    pub fn from_report(report: &RouteAirQualityReport) -> Self {
        let route_line = report
            .route
            .path
            .iter()
            .map(|point| [point.latitude(), point.longitude()])
            .collect();

        let markers = report.samples.iter().map(MapMarker::from_sample).collect();

        Self {
            route_line,
            markers,
            route_info: RouteInfo {
                distance_km: report.route.distance_km,
                duration_min: report.route.duration_min,
                distance_text: format!("{:.2} km", report.route.distance_km),
                duration_text: format!("{:.2} minutes", report.route.duration_min),
            },
            air_quality: AirQualitySummary {
                heading: "AQI Along the Route".to_string(),
                lines: report.samples.iter().map(summary_line).collect(),
            },
        }
    }
}

impl MapMarker {
    fn from_sample(sample: &AirQualitySample) -> Self {
        Self {
            position: [sample.coordinate.latitude(), sample.coordinate.longitude()],
            popup: Popup {
                title: sample.place_label.clone(),
                body: aqi_text(sample),
            },
        }
    }
}

fn aqi_text(sample: &AirQualitySample) -> String {
    format!(
        "AQI: {} ({})",
        sample.format_raw_index(),
        sample.category.label()
    )
}

fn summary_line(sample: &AirQualitySample) -> String {
    format!(
        "{} (Lat: {:.2}, Lon: {:.2}) - {}",
        sample.place_label,
        sample.coordinate.latitude(),
        sample.coordinate.longitude(),
        aqi_text(sample)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AqiCategory, BuildRequest, Coordinate, RouteResult, TransportMode};
    use chrono::Utc;

    fn report() -> RouteAirQualityReport {
        let delhi = Coordinate::new(28.7041, 77.1025, "test").unwrap();
        let agra = Coordinate::new(27.1767, 78.0081, "test").unwrap();
        RouteAirQualityReport {
            request: BuildRequest::new("Delhi", "Agra", TransportMode::Driving),
            route: RouteResult {
                path: vec![delhi, agra],
                distance_km: 233.4,
                duration_min: 210.5,
            },
            samples: vec![
                AirQualitySample {
                    coordinate: delhi,
                    raw_index: Some(5.0),
                    category: AqiCategory::VeryPoor,
                    place_label: "Delhi, India".to_string(),
                },
                AirQualitySample {
                    coordinate: agra,
                    raw_index: None,
                    category: AqiCategory::Unknown,
                    place_label: "Unknown Location".to_string(),
                },
            ],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_route_info_texts() {
        let view = MapView::from_report(&report());
        assert_eq!(view.route_info.distance_text, "233.40 km");
        assert_eq!(view.route_info.duration_text, "210.50 minutes");
        assert_eq!(view.route_line[0], [28.7041, 77.1025]);
    }

    #[test]
    fn test_markers_follow_samples() {
        let view = MapView::from_report(&report());
        assert_eq!(view.markers.len(), 2);
        assert_eq!(view.markers[0].popup.title, "Delhi, India");
        assert_eq!(view.markers[0].popup.body, "AQI: 5 (Very Poor)");
        assert_eq!(view.markers[1].popup.body, "AQI: N/A (Unknown)");
    }

    #[test]
    fn test_summary_lines() {
        let view = MapView::from_report(&report());
        assert_eq!(
            view.air_quality.lines[0],
            "Delhi, India (Lat: 28.70, Lon: 77.10) - AQI: 5 (Very Poor)"
        );
    }
}
