//! Route air-quality pipeline
//!
//! Leaf components first, each owning one step:
//! - `GeocodeResolver`: location text to coordinates
//! - `RoutePlanner`: start/end coordinates to a path with distance and duration
//! - `WaypointSampler`: dense path to a bounded list of waypoints
//! - `AirQualityProbe`: waypoint to a normalized reading
//! - `PlaceNameResolver`: waypoint to a display label
//! - `RouteAirQualityAggregator`: runs the steps above in order

pub mod aggregator;
pub mod geocode;
pub mod place_name;
pub mod planner;
pub mod probe;
pub mod sampler;

pub use aggregator::RouteAirQualityAggregator;
pub use geocode::GeocodeResolver;
pub use place_name::{PlaceNameResolver, UNKNOWN_LOCATION};
pub use planner::RoutePlanner;
pub use probe::AirQualityProbe;
pub use sampler::WaypointSampler;
