//! Reduce a dense route path to a bounded set of waypoints

use crate::models::Coordinate;
use crate::{AirRouteError, Result};

/// Picks every `stride`-th point of a path, starting at the first one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaypointSampler {
    target_count: usize,
}

impl Default for WaypointSampler {
    fn default() -> Self {
        Self {
            target_count: Self::DEFAULT_TARGET_COUNT,
        }
    }
}

impl WaypointSampler {
    pub const DEFAULT_TARGET_COUNT: usize = 10;

    /// Create a sampler collecting at most `target_count` waypoints
    pub fn new(target_count: usize) -> Result<Self> {
        if target_count == 0 {
            return Err(AirRouteError::validation(
                "Waypoint target count must be at least 1",
            ));
        }
        Ok(Self { target_count })
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// `floor(len / target_count)`, but never below 1 so short paths still advance
    #[must_use]
    pub fn stride(&self, path_len: usize) -> usize {
        (path_len / self.target_count).max(1)
    }

    /// Number of waypoints [`Self::sample`] returns for a path of `path_len` points
    #[must_use]
    pub fn sample_count(&self, path_len: usize) -> usize {
        path_len.div_ceil(self.stride(path_len)).min(self.target_count)
    }

    /// Subsequence of `path` at a fixed stride, index 0 included, stopping after
    /// `target_count` points or at the end of the path.
    #[must_use]
    pub fn sample(&self, path: &[Coordinate]) -> Vec<Coordinate> {
        path.iter()
            .step_by(self.stride(path.len()))
            .take(self.target_count)
            .copied()
            .collect()
    }
}
