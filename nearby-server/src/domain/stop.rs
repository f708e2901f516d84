//! Transit stop types.

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// A physical transit boarding location.
///
/// Built per-request from the transit API response; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Upstream stop identifier (e.g., "place-pktrm" or "70200").
    pub id: String,

    /// Human-readable stop name.
    pub name: String,

    /// Stop location.
    pub coordinate: Coordinate,

    /// Straight-line distance from the requesting user, in metres.
    /// Derived after the lookup, not part of the upstream response.
    pub distance_m: f64,

    /// Platform code, where the stop is a specific platform.
    pub platform_code: Option<String>,

    /// Upstream free-text description.
    pub description: Option<String>,
}

impl Stop {
    /// Fill in the derived distance from the given origin.
    pub fn with_distance_from(mut self, origin: &Coordinate) -> Self {
        self.distance_m = origin.haversine_meters(&self.coordinate);
        self
    }
}
