//! Coordinate model for geographic positions

use serde::{Deserialize, Serialize};

use crate::{AirRouteError, Result};

/// A validated WGS84 position. Only constructible through [`Coordinate::new`],
/// including when deserialized.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "Degrees")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

/// Unchecked wire form of a [`Coordinate`]
#[derive(Deserialize)]
struct Degrees {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<Degrees> for Coordinate {
    type Error = AirRouteError;

    fn try_from(degrees: Degrees) -> Result<Self> {
        if !in_range(degrees.latitude, degrees.longitude) {
            return Err(AirRouteError::validation(format!(
                "coordinate out of range: lat={}, lon={}",
                degrees.latitude, degrees.longitude
            )));
        }
        Ok(Self {
            latitude: degrees.latitude,
            longitude: degrees.longitude,
        })
    }
}

fn in_range(latitude: f64, longitude: f64) -> bool {
    (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude)
}

impl Coordinate {
    /// Create a coordinate, rejecting values outside the valid ranges.
    ///
    /// Providers hand us raw numbers, so a bad value surfaces as an upstream error
    /// attributed to `service`.
    pub fn new(latitude: f64, longitude: f64, service: &'static str) -> Result<Self> {
        if !in_range(latitude, longitude) {
            return Err(AirRouteError::upstream(
                service,
                format!("invalid coordinate returned: lat={latitude}, lon={longitude}"),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees, within [-90, 90]
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees, within [-180, 180]
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Build a coordinate from a GeoJSON `[lon, lat]` position
    pub fn from_lon_lat(position: &[f64], service: &'static str) -> Result<Self> {
        match position {
            [lon, lat, ..] => Self::new(*lat, *lon, service),
            _ => Err(AirRouteError::upstream(
                service,
                format!("malformed position with {} values", position.len()),
            )),
        }
    }

    /// Format as a `lon,lat` pair, the order GeoJSON-based routers expect
    #[must_use]
    pub fn to_lon_lat_param(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }

    /// Format coordinate for logs and labels
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_ranges() {
        assert!(Coordinate::new(28.70, 77.10, "test").is_ok());
        assert!(Coordinate::new(90.0, -180.0, "test").is_ok());
        assert!(Coordinate::new(90.1, 0.0, "test").is_err());
        assert!(Coordinate::new(0.0, 180.5, "test").is_err());
        assert!(Coordinate::new(f64::NAN, 0.0, "test").is_err());
    }

    #[test]
    fn test_from_lon_lat_swaps_order() {
        let coordinate = Coordinate::from_lon_lat(&[77.10, 28.70], "test").unwrap();
        assert_eq!(coordinate.latitude(), 28.70);
        assert_eq!(coordinate.longitude(), 77.10);
        assert_eq!(coordinate.to_lon_lat_param(), "77.1,28.7");

        // elevation as a third value is ignored
        assert!(Coordinate::from_lon_lat(&[77.10, 28.70, 216.0], "test").is_ok());
        assert!(Coordinate::from_lon_lat(&[77.10], "test").is_err());
    }

    #[test]
    fn test_deserialize_checks_ranges() {
        let coordinate: Coordinate =
            serde_json::from_str(r#"{"latitude": 28.7, "longitude": 77.1}"#).unwrap();
        assert_eq!(coordinate, Coordinate::new(28.7, 77.1, "test").unwrap());

        let out_of_range =
            serde_json::from_str::<Coordinate>(r#"{"latitude": 128.7, "longitude": 77.1}"#);
        assert!(out_of_range.is_err());
    }
}
