//! Nearby-stop aggregation.
//!
//! The per-request orchestration: look up nearby stops, then for each
//! stop fetch predictions and a walk estimate concurrently, compute
//! leave-by numbers, and return the stops sorted by urgency.

mod config;
mod leave_by;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::warn;

use crate::domain::{Coordinate, Prediction, RouteInfo, Stop, WalkEstimate};
use crate::transit::{TransitApi, TransitError};
use crate::walk::WalkTimeEstimator;

pub use config::NearbyConfig;
pub use leave_by::{leave_by, LeaveBy};

/// Error from the aggregation flow.
///
/// Only the stop lookup can fail the whole request; per-stop failures
/// degrade that stop instead.
#[derive(Debug, thiserror::Error)]
pub enum NearbyError {
    /// The nearby-stops query failed; nothing to aggregate.
    #[error("failed to look up nearby stops: {0}")]
    StopLookup(#[source] TransitError),
}

impl NearbyError {
    /// Whether the underlying failure was an upstream rate limit.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, NearbyError::StopLookup(TransitError::RateLimited))
    }
}

/// One prediction at a stop, with its leave-by numbers.
///
/// `leave_by` is `None` when the prediction has no usable time.
#[derive(Debug, Clone)]
pub struct DepartureOption {
    pub prediction: Prediction,
    pub leave_by: Option<LeaveBy>,
}

/// The aggregated result for one stop.
#[derive(Debug, Clone)]
pub struct StopDepartures {
    pub stop: Stop,
    pub walk: WalkEstimate,

    /// All routes serving this stop, whether or not any of them has a
    /// near-term departure. Empty when the route fetch failed.
    pub routes: Vec<RouteInfo>,

    /// True when the prediction fetch for this stop failed. The stop
    /// is kept with an empty prediction list rather than dropped.
    pub degraded: bool,

    /// Predictions ordered by departure time ascending.
    pub departures: Vec<DepartureOption>,
}

impl StopDepartures {
    /// The stop's urgency: slack seconds of its earliest timed
    /// prediction. `None` when there is nothing to catch.
    pub fn urgency_seconds(&self) -> Option<i64> {
        self.departures
            .iter()
            .find_map(|d| d.leave_by.map(|lb| lb.leave_in_seconds))
    }
}

/// Aggregate nearby stops with predictions, walk estimates, and
/// leave-by numbers.
///
/// Per-stop prediction and walk work runs concurrently across stops;
/// the fan-out is bounded by `config.max_stops`. Output is sorted
/// ascending by urgency, with stops that have nothing to catch last
/// (nearest first among those).
pub async fn nearby_departures<T: TransitApi>(
    transit: &T,
    walker: &WalkTimeEstimator,
    config: &NearbyConfig,
    origin: Coordinate,
    radius: f64,
    now: DateTime<Utc>,
) -> Result<Vec<StopDepartures>, NearbyError> {
    let stops = transit
        .nearby_stops(&origin, radius, config.max_stops)
        .await
        .map_err(NearbyError::StopLookup)?;

    let per_stop = stops.into_iter().map(|stop| async move {
        let walk = walker.estimate(&origin, &stop.coordinate).await;
        let predictions = transit
            .predictions_for_stop(&stop.id, config.max_predictions_per_stop)
            .await;

        // Routes are informational; a failed fetch leaves the list
        // empty rather than degrading the stop.
        let routes = match transit.routes_for_stop(&stop.id).await {
            Ok(routes) => routes,
            Err(e) => {
                warn!("routes for stop {} failed: {e}", stop.id);
                Vec::new()
            }
        };

        (stop, walk, routes, predictions)
    });

    let mut results: Vec<StopDepartures> = join_all(per_stop)
        .await
        .into_iter()
        .map(|(stop, walk, routes, predictions)| {
            let (departures, degraded) = match predictions {
                Ok(preds) => {
                    let departures = preds
                        .into_iter()
                        .map(|prediction| DepartureOption {
                            leave_by: leave_by(&prediction, &walk, now),
                            prediction,
                        })
                        .collect();
                    (departures, false)
                }
                Err(e) => {
                    warn!("predictions for stop {} failed: {e}", stop.id);
                    (Vec::new(), true)
                }
            };

            StopDepartures {
                stop,
                walk,
                routes,
                degraded,
                departures,
            }
        })
        .collect();

    results.sort_by(|a, b| match (a.urgency_seconds(), b.urgency_seconds()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.stop.distance_m.total_cmp(&b.stop.distance_m),
    });

    Ok(results)
}
