//! Real-time departure prediction types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GTFS route type, as used by the MBTA v3 API.
///
/// Unknown values are preserved rather than rejected; the API adds
/// types occasionally and an unknown type should not fail a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteType(pub i64);

impl RouteType {
    /// Human-readable label for display ("Subway", "Bus", ...).
    pub fn label(&self) -> &'static str {
        match self.0 {
            0 => "Light Rail",
            1 => "Subway",
            2 => "Commuter Rail",
            3 => "Bus",
            4 => "Ferry",
            _ => "",
        }
    }
}

/// Route detail attached to a prediction, joined from the API's
/// `included` resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteInfo {
    /// Upstream route identifier (e.g., "Red", "1").
    pub id: String,

    /// Short name ("1", "SL4"); often empty for subway lines.
    pub short_name: String,

    /// Long name ("Red Line").
    pub long_name: String,

    /// Route type, when known.
    pub route_type: Option<RouteType>,

    /// Hex color for display.
    pub color: String,

    /// Direction names indexed by direction_id (e.g., ["Outbound", "Inbound"]).
    pub direction_names: Vec<String>,
}

impl RouteInfo {
    /// Best display name: short name, then long name, then the raw id.
    pub fn display_name(&self) -> &str {
        if !self.short_name.is_empty() {
            &self.short_name
        } else if !self.long_name.is_empty() {
            &self.long_name
        } else {
            &self.id
        }
    }
}

/// A real-time departure prediction for a route at a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Stop this prediction belongs to.
    pub stop_id: String,

    /// Route detail (joined from included resources; defaulted when the
    /// API omits the route).
    pub route: RouteInfo,

    /// Trip headsign ("Alewife"), when known.
    pub headsign: String,

    /// Direction name resolved from the route's direction_names, when known.
    pub direction_name: String,

    /// Predicted arrival time at the stop.
    pub arrival_time: Option<DateTime<Utc>>,

    /// Predicted departure time from the stop.
    pub departure_time: Option<DateTime<Utc>>,

    /// Upstream status string ("Now boarding"), when present.
    pub status: Option<String>,
}

impl Prediction {
    /// The time the user must be at the stop by.
    ///
    /// Departure when present, else arrival. Terminal stops report only
    /// an arrival; mid-route stops usually report both.
    pub fn effective_departure(&self) -> Option<DateTime<Utc>> {
        self.departure_time.or(self.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn route_type_labels() {
        assert_eq!(RouteType(0).label(), "Light Rail");
        assert_eq!(RouteType(1).label(), "Subway");
        assert_eq!(RouteType(2).label(), "Commuter Rail");
        assert_eq!(RouteType(3).label(), "Bus");
        assert_eq!(RouteType(4).label(), "Ferry");
        assert_eq!(RouteType(99).label(), "");
    }

    #[test]
    fn display_name_preference() {
        let mut route = RouteInfo {
            id: "Red".into(),
            short_name: String::new(),
            long_name: "Red Line".into(),
            ..Default::default()
        };
        assert_eq!(route.display_name(), "Red Line");

        route.short_name = "RL".into();
        assert_eq!(route.display_name(), "RL");

        route.short_name.clear();
        route.long_name.clear();
        assert_eq!(route.display_name(), "Red");
    }

    #[test]
    fn effective_departure_prefers_departure() {
        let arrival = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let departure = Utc.with_ymd_and_hms(2026, 3, 1, 12, 1, 0).unwrap();

        let mut pred = Prediction {
            stop_id: "70200".into(),
            route: RouteInfo::default(),
            headsign: String::new(),
            direction_name: String::new(),
            arrival_time: Some(arrival),
            departure_time: Some(departure),
            status: None,
        };
        assert_eq!(pred.effective_departure(), Some(departure));

        // Terminal stop: departure absent, arrival stands in.
        pred.departure_time = None;
        assert_eq!(pred.effective_departure(), Some(arrival));

        pred.arrival_time = None;
        assert_eq!(pred.effective_departure(), None);
    }
}
