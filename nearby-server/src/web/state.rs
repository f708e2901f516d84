//! Application state for the web layer.

use std::sync::Arc;

use crate::nearby::NearbyConfig;
use crate::transit::MbtaClient;
use crate::walk::WalkTimeEstimator;

/// Shared application state.
///
/// Built once at startup; everything in here is read-only for the
/// lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    /// Transit API client
    pub transit: Arc<MbtaClient>,

    /// Walk-time estimator (routed with heuristic fallback)
    pub walker: Arc<WalkTimeEstimator>,

    /// Aggregation configuration
    pub config: Arc<NearbyConfig>,

    /// Whether a transit credential was configured (for health reporting)
    pub transit_key_set: bool,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        transit: MbtaClient,
        walker: WalkTimeEstimator,
        config: NearbyConfig,
        transit_key_set: bool,
    ) -> Self {
        Self {
            transit: Arc::new(transit),
            walker: Arc::new(walker),
            config: Arc::new(config),
            transit_key_set,
        }
    }
}
