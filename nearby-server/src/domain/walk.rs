//! Walk estimate types.

use serde::{Deserialize, Serialize};

/// How a walk estimate was produced.
///
/// Carried on the estimate itself so callers can distinguish routed
/// from heuristic values without inspecting error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkSource {
    /// Walking directions from the routing service.
    Routed,

    /// Great-circle distance at an assumed walking speed.
    Heuristic,
}

/// A walking-time estimate to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkEstimate {
    /// Walk duration in whole seconds.
    pub seconds: i64,

    /// Where the estimate came from.
    pub source: WalkSource,
}

impl WalkEstimate {
    /// Walk duration in minutes, to one decimal place.
    pub fn minutes(&self) -> f64 {
        (self.seconds as f64 / 60.0 * 10.0).round() / 10.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_rounds_to_one_decimal() {
        let est = WalkEstimate {
            seconds: 250,
            source: WalkSource::Heuristic,
        };
        assert_eq!(est.minutes(), 4.2);

        let est = WalkEstimate {
            seconds: 240,
            source: WalkSource::Routed,
        };
        assert_eq!(est.minutes(), 4.0);
    }

    #[test]
    fn source_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&WalkSource::Routed).unwrap(),
            "\"routed\""
        );
        assert_eq!(
            serde_json::to_string(&WalkSource::Heuristic).unwrap(),
            "\"heuristic\""
        );
    }
}
