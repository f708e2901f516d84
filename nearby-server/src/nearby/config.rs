//! Aggregation configuration.

/// Configuration parameters for the nearby-stops aggregation.
#[derive(Debug, Clone)]
pub struct NearbyConfig {
    /// Default search radius, in the transit API's degree-based unit.
    pub default_radius: f64,

    /// Maximum number of stops to aggregate per request.
    pub max_stops: usize,

    /// Maximum number of predictions to fetch per stop.
    pub max_predictions_per_stop: usize,
}

impl NearbyConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(default_radius: f64, max_stops: usize, max_predictions_per_stop: usize) -> Self {
        Self {
            default_radius,
            max_stops,
            max_predictions_per_stop,
        }
    }
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            default_radius: 0.01,
            max_stops: 12,
            max_predictions_per_stop: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = NearbyConfig::default();

        assert_eq!(config.default_radius, 0.01);
        assert_eq!(config.max_stops, 12);
        assert_eq!(config.max_predictions_per_stop, 8);
    }

    #[test]
    fn custom_config() {
        let config = NearbyConfig::new(0.02, 5, 4);

        assert_eq!(config.default_radius, 0.02);
        assert_eq!(config.max_stops, 5);
        assert_eq!(config.max_predictions_per_stop, 4);
    }
}
