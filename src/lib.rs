//! `AirRoute` - driving routes annotated with air quality
//!
//! This library resolves a start and end location, plans a driving route between
//! them, samples waypoints along the path and attaches an air-quality reading and
//! a place name to each waypoint. The resulting report is served to a map
//! front-end over HTTP.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod providers;
pub mod session;
pub mod web;

// Re-export core types for public API
pub use config::AirRouteConfig;
pub use display::MapView;
pub use error::AirRouteError;
pub use models::{
    AirQualitySample, AqiCategory, BuildRequest, Coordinate, RouteAirQualityReport, RouteResult,
    TransportMode,
};
pub use pipeline::{
    AirQualityProbe, GeocodeResolver, PlaceNameResolver, RouteAirQualityAggregator, RoutePlanner,
    WaypointSampler,
};
pub use providers::{AirQualityProvider, Geocoder, Providers, RouteProvider};
pub use session::{BuildOutcome, BuildSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AirRouteError>;
