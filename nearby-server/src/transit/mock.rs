//! Mock transit client for testing without API access.
//!
//! Serves canned stops and predictions, either built in memory or
//! loaded from raw API JSON fixtures on disk, as if they were live
//! responses. Individual stops can be set to fail their prediction
//! fetch, for exercising the degraded path.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::domain::{Coordinate, Prediction, RouteInfo, Stop};

use super::convert::{convert_predictions, convert_routes, convert_stops};
use super::error::TransitError;
use super::types::{PredictionsResponse, RoutesResponse, StopsResponse};
use super::TransitApi;

/// Mock transit client backed by canned data.
#[derive(Debug, Clone, Default)]
pub struct MockTransitClient {
    /// Stops returned from `nearby_stops`, before distance sorting.
    stops: Vec<Stop>,

    /// Predictions keyed by stop id.
    predictions: HashMap<String, Vec<Prediction>>,

    /// Routes serving each stop, keyed by stop id.
    routes: HashMap<String, Vec<RouteInfo>>,

    /// Stop ids whose prediction fetch should fail.
    failing_stops: HashSet<String>,

    /// Stop ids whose route fetch should fail.
    failing_routes: HashSet<String>,
}

impl MockTransitClient {
    /// Create an empty mock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stop to the nearby set.
    pub fn with_stop(mut self, stop: Stop) -> Self {
        self.stops.push(stop);
        self
    }

    /// Set the predictions for a stop.
    pub fn with_predictions(mut self, stop_id: impl Into<String>, preds: Vec<Prediction>) -> Self {
        self.predictions.insert(stop_id.into(), preds);
        self
    }

    /// Set the routes serving a stop.
    pub fn with_routes(mut self, stop_id: impl Into<String>, routes: Vec<RouteInfo>) -> Self {
        self.routes.insert(stop_id.into(), routes);
        self
    }

    /// Make the prediction fetch for a stop fail.
    pub fn with_failing_predictions(mut self, stop_id: impl Into<String>) -> Self {
        self.failing_stops.insert(stop_id.into());
        self
    }

    /// Make the route fetch for a stop fail.
    pub fn with_failing_routes(mut self, stop_id: impl Into<String>) -> Self {
        self.failing_routes.insert(stop_id.into());
        self
    }

    /// Load a mock from a directory of raw API JSON fixtures.
    ///
    /// Expects a `stops.json` (a `GET /stops` response body) and any
    /// number of `predictions_{stop_id}.json` / `routes_{stop_id}.json`
    /// files (each a raw response body for the matching query).
    /// Distances are computed relative to `origin`.
    pub fn from_fixture_dir(
        dir: impl AsRef<Path>,
        origin: &Coordinate,
    ) -> Result<Self, TransitError> {
        let dir = dir.as_ref();

        let stops_json = std::fs::read_to_string(dir.join("stops.json")).map_err(|e| {
            TransitError::ApiError {
                status: 0,
                message: format!("Failed to read stops fixture: {e}"),
            }
        })?;

        let stops_response: StopsResponse =
            serde_json::from_str(&stops_json).map_err(|e| TransitError::Json {
                message: e.to_string(),
                body: Some(stops_json.chars().take(500).collect()),
            })?;

        let stops = convert_stops(&stops_response, origin);

        let mut predictions = HashMap::new();
        for stop in &stops {
            let path = dir.join(format!("predictions_{}.json", stop.id));
            if !path.is_file() {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(|e| TransitError::ApiError {
                status: 0,
                message: format!("Failed to read {path:?}: {e}"),
            })?;

            let response: PredictionsResponse =
                serde_json::from_str(&json).map_err(|e| TransitError::Json {
                    message: e.to_string(),
                    body: Some(json.chars().take(500).collect()),
                })?;

            predictions.insert(stop.id.clone(), convert_predictions(&response, &stop.id));
        }

        let mut routes = HashMap::new();
        for stop in &stops {
            let path = dir.join(format!("routes_{}.json", stop.id));
            if !path.is_file() {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(|e| TransitError::ApiError {
                status: 0,
                message: format!("Failed to read {path:?}: {e}"),
            })?;

            let response: RoutesResponse =
                serde_json::from_str(&json).map_err(|e| TransitError::Json {
                    message: e.to_string(),
                    body: Some(json.chars().take(500).collect()),
                })?;

            routes.insert(stop.id.clone(), convert_routes(&response));
        }

        Ok(Self {
            stops,
            predictions,
            routes,
            failing_stops: HashSet::new(),
            failing_routes: HashSet::new(),
        })
    }

    /// Stop ids available in the mock.
    pub fn stop_ids(&self) -> Vec<String> {
        self.stops.iter().map(|s| s.id.clone()).collect()
    }
}

impl TransitApi for MockTransitClient {
    async fn nearby_stops(
        &self,
        origin: &Coordinate,
        _radius: f64,
        limit: usize,
    ) -> Result<Vec<Stop>, TransitError> {
        let mut stops: Vec<Stop> = self
            .stops
            .iter()
            .cloned()
            .map(|s| s.with_distance_from(origin))
            .collect();

        stops.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        stops.truncate(limit);
        Ok(stops)
    }

    async fn predictions_for_stop(
        &self,
        stop_id: &str,
        limit: usize,
    ) -> Result<Vec<Prediction>, TransitError> {
        if self.failing_stops.contains(stop_id) {
            return Err(TransitError::ApiError {
                status: 503,
                message: format!("mock failure for stop {stop_id}"),
            });
        }

        let mut preds = self.predictions.get(stop_id).cloned().unwrap_or_default();
        preds.truncate(limit);
        Ok(preds)
    }

    async fn routes_for_stop(&self, stop_id: &str) -> Result<Vec<RouteInfo>, TransitError> {
        if self.failing_routes.contains(stop_id) {
            return Err(TransitError::ApiError {
                status: 503,
                message: format!("mock route failure for stop {stop_id}"),
            });
        }

        Ok(self.routes.get(stop_id).cloned().unwrap_or_default())
    }
}
