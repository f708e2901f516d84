//! MBTA v3 API integration.
//!
//! Provides the HTTP client for nearby-stop and prediction queries,
//! conversion from the JSON:API wire format to domain types, and a
//! fixture-backed mock for tests.

mod client;
mod convert;
mod error;
pub mod mock;
pub mod types;

use std::future::Future;

use crate::domain::{Coordinate, Prediction, RouteInfo, Stop};

pub use client::{MbtaClient, TransitConfig};
pub use convert::{convert_predictions, convert_routes, convert_stops};
pub use error::TransitError;
pub use mock::MockTransitClient;

/// The transit API surface the aggregator depends on.
///
/// Implemented by the real `MbtaClient` and by `MockTransitClient` for
/// tests. Futures are `Send` so implementations can be driven from
/// axum handlers.
pub trait TransitApi: Send + Sync {
    /// Stops near a coordinate, nearest first, at most `limit`.
    fn nearby_stops(
        &self,
        origin: &Coordinate,
        radius: f64,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Stop>, TransitError>> + Send;

    /// Upcoming predictions for a stop, ordered by time ascending.
    /// An empty result is a valid outcome.
    fn predictions_for_stop(
        &self,
        stop_id: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Prediction>, TransitError>> + Send;

    /// All routes serving a stop, independent of near-term service.
    fn routes_for_stop(
        &self,
        stop_id: &str,
    ) -> impl Future<Output = Result<Vec<RouteInfo>, TransitError>> + Send;
}
