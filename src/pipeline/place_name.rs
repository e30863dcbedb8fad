//! Coordinate to display label (reverse geocoding)

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::Result;
use crate::models::Coordinate;
use crate::providers::Geocoder;

/// Label used when the reverse geocoder has no candidate
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// Names sampled waypoints
#[derive(Clone)]
pub struct PlaceNameResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl PlaceNameResolver {
    #[must_use]
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// First label for `point`, or [`UNKNOWN_LOCATION`]. Only transport failures
    /// are errors.
    #[instrument(skip(self))]
    pub async fn lookup(&self, point: Coordinate) -> Result<String> {
        let labels = self.geocoder.reverse(point).await?;

        match labels.into_iter().next() {
            Some(label) => Ok(label),
            None => {
                debug!("No place name for ({})", point.format_coordinates());
                Ok(UNKNOWN_LOCATION.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AirRouteError;
    use async_trait::async_trait;

    struct LabelGeocoder(Result<Vec<String>>);

    #[async_trait]
    impl Geocoder for LabelGeocoder {
        async fn search(&self, _text: &str) -> Result<Vec<Coordinate>> {
            Ok(Vec::new())
        }

        async fn reverse(&self, _point: Coordinate) -> Result<Vec<String>> {
            match &self.0 {
                Ok(labels) => Ok(labels.clone()),
                Err(_) => Err(AirRouteError::upstream("test", "HTTP 503")),
            }
        }
    }

    fn point() -> Coordinate {
        Coordinate::new(27.49, 77.67, "test").unwrap()
    }

    #[tokio::test]
    async fn test_first_label_wins() {
        let resolver = PlaceNameResolver::new(Arc::new(LabelGeocoder(Ok(vec![
            "Mathura, UP, India".to_string(),
            "Uttar Pradesh, India".to_string(),
        ]))));

        assert_eq!(resolver.lookup(point()).await.unwrap(), "Mathura, UP, India");
    }

    #[tokio::test]
    async fn test_no_candidates_yields_sentinel() {
        let resolver = PlaceNameResolver::new(Arc::new(LabelGeocoder(Ok(Vec::new()))));

        assert_eq!(resolver.lookup(point()).await.unwrap(), UNKNOWN_LOCATION);
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let resolver = PlaceNameResolver::new(Arc::new(LabelGeocoder(Err(
            AirRouteError::upstream("test", "unused"),
        ))));

        assert!(resolver.lookup(point()).await.is_err());
    }
}
