//! Location text to coordinates

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::models::Coordinate;
use crate::providers::Geocoder;
use crate::{AirRouteError, Result};

/// Resolves free-text locations with a forward geocoder
#[derive(Clone)]
pub struct GeocodeResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl GeocodeResolver {
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolve a location text to the first candidate the geocoder returns.
    /// No ranking or disambiguation is attempted.
    #[instrument(skip(self))]
    pub async fn resolve(&self, location_text: &str) -> Result<Coordinate> {
        let query = location_text.trim();
        if query.is_empty() {
            return Err(AirRouteError::validation("Location cannot be empty"));
        }

        let candidates = self.geocoder.search(query).await?;
        let Some(coordinate) = candidates.into_iter().next() else {
            warn!("No geocoding candidates for '{}'", query);
            return Err(AirRouteError::not_found(query));
        };

        debug!("Resolved '{}' to ({})", query, coordinate.format_coordinates());
        Ok(coordinate)
    }
}
