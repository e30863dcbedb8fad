//! Data models for the AirRoute pipeline
//!
//! This module contains the domain models organized by concern:
//! - Coordinate: validated geographic positions
//! - Route: transport mode and normalized route results
//! - Air quality: canonical categories and per-waypoint samples
//! - Report: build request and the final report

pub mod air_quality;
pub mod coordinate;
pub mod report;
pub mod route;

// Re-export all public types for convenient access
pub use air_quality::{AirQualityObservation, AirQualityReading, AirQualitySample, AqiCategory};
pub use coordinate::Coordinate;
pub use report::{BuildRequest, RouteAirQualityReport};
pub use route::{RouteResult, TransportMode};
