//! Walk-time estimation.
//!
//! Primary path asks the routing service for walking directions;
//! fallback computes great-circle distance at an assumed walking speed.
//! The fallback cannot fail for valid coordinates, so an estimate is
//! always produced. The two paths are distinguished by the source tag
//! on the result rather than by error branching.

use tracing::warn;

use crate::domain::{Coordinate, WalkEstimate, WalkSource};
use crate::routing::RoutingClient;

/// Assumed walking speed for the heuristic estimate, in metres/second.
pub const WALKING_SPEED_MPS: f64 = 1.4;

/// Walk-time estimator with a routed primary path and a heuristic
/// fallback.
#[derive(Debug, Clone)]
pub struct WalkTimeEstimator {
    /// Routing client; `None` when no routing credential is configured,
    /// in which case every estimate is heuristic.
    routing: Option<RoutingClient>,
}

impl WalkTimeEstimator {
    /// Create an estimator. Pass `None` to run heuristic-only.
    pub fn new(routing: Option<RoutingClient>) -> Self {
        Self { routing }
    }

    /// Whether the routed path is available at all.
    pub fn has_routing(&self) -> bool {
        self.routing.is_some()
    }

    /// Estimate the walking time between two coordinates.
    ///
    /// Never fails: any routing-service failure (missing credential,
    /// network error, non-2xx, malformed body, timeout) falls through
    /// to the heuristic.
    pub async fn estimate(&self, origin: &Coordinate, dest: &Coordinate) -> WalkEstimate {
        if let Some(routing) = &self.routing {
            match routing.walking_seconds(origin, dest).await {
                Ok(seconds) if seconds >= 0 => {
                    return WalkEstimate {
                        seconds,
                        source: WalkSource::Routed,
                    };
                }
                Ok(seconds) => {
                    warn!("routing returned negative duration {seconds}, using heuristic");
                }
                Err(e) => {
                    warn!("routing failed, using heuristic: {e}");
                }
            }
        }

        heuristic(origin, dest)
    }
}

/// Heuristic walk estimate: great-circle distance / assumed speed.
///
/// Terminal error boundary for walk estimation; total for any valid
/// coordinate pair.
pub fn heuristic(origin: &Coordinate, dest: &Coordinate) -> WalkEstimate {
    let distance_m = origin.haversine_meters(dest);
    WalkEstimate {
        seconds: (distance_m / WALKING_SPEED_MPS).round() as i64,
        source: WalkSource::Heuristic,
    }
}
