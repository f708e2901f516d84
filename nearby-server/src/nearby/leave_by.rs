//! Leave-by calculation.
//!
//! Combines a departure prediction with a walk estimate to answer:
//! "how many minutes until I have to start walking?"

use chrono::{DateTime, Utc};

use crate::domain::{Prediction, WalkEstimate};

/// The leave-by numbers for one prediction at one stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaveBy {
    /// Seconds until the vehicle departs.
    pub departs_in_seconds: i64,

    /// Seconds of slack before the user must start walking. Negative
    /// when the departure can no longer be reached on foot; reported
    /// anyway so callers can show urgency.
    pub leave_in_seconds: i64,

    /// Whether the walk takes longer than the time until departure.
    pub too_late: bool,
}

impl LeaveBy {
    /// Minutes until departure, to one decimal place.
    pub fn departs_in_minutes(&self) -> f64 {
        round_tenth(self.departs_in_seconds as f64 / 60.0)
    }

    /// Minutes of slack, to one decimal place.
    pub fn leave_in_minutes(&self) -> f64 {
        round_tenth(self.leave_in_seconds as f64 / 60.0)
    }
}

fn round_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Compute the leave-by numbers for a prediction and walk estimate.
///
/// Returns `None` when the prediction carries no usable time (neither
/// departure nor arrival); that is a valid, non-error outcome.
pub fn leave_by(
    prediction: &Prediction,
    walk: &WalkEstimate,
    now: DateTime<Utc>,
) -> Option<LeaveBy> {
    let departure = prediction.effective_departure()?;
    let departs_in_seconds = (departure - now).num_seconds();
    let leave_in_seconds = departs_in_seconds - walk.seconds;

    Some(LeaveBy {
        departs_in_seconds,
        leave_in_seconds,
        too_late: leave_in_seconds < 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RouteInfo, WalkSource};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn prediction_departing_in(minutes: i64) -> Prediction {
        Prediction {
            stop_id: "70200".into(),
            route: RouteInfo::default(),
            headsign: String::new(),
            direction_name: String::new(),
            arrival_time: None,
            departure_time: Some(now() + Duration::minutes(minutes)),
            status: None,
        }
    }

    fn walk_of_minutes(minutes: i64) -> WalkEstimate {
        WalkEstimate {
            seconds: minutes * 60,
            source: WalkSource::Heuristic,
        }
    }

    #[test]
    fn catchable_departure() {
        // Departure at T+10, walk 4 minutes: leave in 6, not too late.
        let result = leave_by(&prediction_departing_in(10), &walk_of_minutes(4), now()).unwrap();

        assert_eq!(result.leave_in_minutes(), 6.0);
        assert_eq!(result.departs_in_minutes(), 10.0);
        assert!(!result.too_late);
    }

    #[test]
    fn missed_departure_still_reported() {
        // Departure at T+2, walk 5 minutes: leave in -3, too late.
        let result = leave_by(&prediction_departing_in(2), &walk_of_minutes(5), now()).unwrap();

        assert_eq!(result.leave_in_minutes(), -3.0);
        assert!(result.too_late);
    }

    #[test]
    fn exact_boundary_is_not_too_late() {
        let result = leave_by(&prediction_departing_in(5), &walk_of_minutes(5), now()).unwrap();

        assert_eq!(result.leave_in_seconds, 0);
        assert!(!result.too_late);
    }

    #[test]
    fn prediction_without_times_yields_none() {
        let mut pred = prediction_departing_in(10);
        pred.departure_time = None;
        pred.arrival_time = None;

        assert!(leave_by(&pred, &walk_of_minutes(4), now()).is_none());
    }

    #[test]
    fn arrival_stands_in_for_departure() {
        let mut pred = prediction_departing_in(10);
        pred.arrival_time = pred.departure_time.take();

        let result = leave_by(&pred, &walk_of_minutes(4), now()).unwrap();
        assert_eq!(result.leave_in_minutes(), 6.0);
    }

    #[test]
    fn fractional_minutes_round_to_tenth() {
        let mut pred = prediction_departing_in(0);
        pred.departure_time = Some(now() + Duration::seconds(250));

        let walk = WalkEstimate {
            seconds: 0,
            source: WalkSource::Heuristic,
        };
        let result = leave_by(&pred, &walk, now()).unwrap();
        assert_eq!(result.departs_in_minutes(), 4.2);
    }
}
