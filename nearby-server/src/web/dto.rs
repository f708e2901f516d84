//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Coordinate, RouteInfo, WalkSource};
use crate::nearby::{DepartureOption, StopDepartures};

/// Query parameters for the nearby endpoint.
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    /// User latitude in degrees.
    pub lat: f64,

    /// User longitude in degrees.
    pub lon: f64,

    /// Search radius override (transit API degree unit).
    pub radius: Option<f64>,
}

/// Response for the nearby endpoint.
#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    /// The origin coordinate the query ran against.
    pub origin: OriginResult,

    /// When this response was computed (RFC 3339, UTC).
    pub updated_at: String,

    /// Aggregated stops, most urgent first.
    pub stops: Vec<StopResult>,

    /// Advisory to the user, set when the stop list is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Echo of the request origin.
#[derive(Debug, Serialize)]
pub struct OriginResult {
    pub lat: f64,
    pub lon: f64,
}

/// One aggregated stop.
#[derive(Debug, Serialize)]
pub struct StopResult {
    /// Upstream stop identifier.
    pub stop_id: String,

    /// Stop name.
    pub name: String,

    /// Platform code, if the stop is a platform.
    pub platform_code: Option<String>,

    /// Upstream description, if any.
    pub description: Option<String>,

    /// Straight-line distance from the user, rounded to whole metres.
    pub distance_m: i64,

    /// Walk duration in seconds.
    pub walk_seconds: i64,

    /// Walk duration in minutes, one decimal.
    pub walk_minutes: f64,

    /// Whether the walk estimate was routed or heuristic.
    pub walk_source: WalkSource,

    /// True when the prediction fetch for this stop failed and the
    /// entry carries no predictions.
    pub degraded: bool,

    /// Whether any predictions are present.
    pub has_predictions: bool,

    /// Routes serving this stop, including ones with no upcoming
    /// departure. Empty when the route lookup failed.
    pub routes: Vec<RouteResult>,

    /// Slack minutes for the stop's earliest catchable departure;
    /// absent when there is nothing to catch.
    pub leave_in_minutes: Option<f64>,

    /// Upcoming departures, soonest first.
    pub predictions: Vec<PredictionResult>,
}

/// A route serving a stop.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Upstream route identifier.
    pub route_id: String,

    /// Display name (short name, else long name, else id).
    pub name: String,

    /// Route long name.
    pub long_name: String,

    /// Route hex color.
    pub color: String,

    /// Route type label ("Subway", "Bus", ...). Empty when unknown.
    pub type_label: String,

    /// Direction names indexed by direction_id.
    pub direction_names: Vec<String>,
}

/// One predicted departure at a stop.
#[derive(Debug, Serialize)]
pub struct PredictionResult {
    /// Upstream route identifier.
    pub route_id: String,

    /// Route display name (short name, else long name, else id).
    pub route_name: String,

    /// Route long name.
    pub route_long_name: String,

    /// Route hex color.
    pub route_color: String,

    /// Route type label ("Subway", "Bus", ...). Empty when unknown.
    pub route_type_label: String,

    /// Trip headsign.
    pub headsign: String,

    /// Direction name ("Inbound"). Empty when unknown.
    pub direction_name: String,

    /// Upstream status string, if any.
    pub status: Option<String>,

    /// Departure time (RFC 3339, UTC); arrival stands in when the
    /// upstream omits departure. Absent for timeless predictions.
    pub departure_time: Option<String>,

    /// Minutes until departure, one decimal.
    pub departs_in_minutes: Option<f64>,

    /// Slack minutes before the user must leave; may be negative.
    pub leave_in_minutes: Option<f64>,

    /// Whether the departure can no longer be reached on foot.
    pub too_late: Option<bool>,
}

/// Response for the health endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall health.
    pub ok: bool,

    /// Whether a transit API key is configured.
    pub transit_key_set: bool,

    /// Whether a routing API key is configured.
    pub routing_key_set: bool,

    /// HTTP status from a probe of the transit API, when reachable.
    pub transit_status: Option<u16>,

    /// Probe error, when the transit API was unreachable.
    pub transit_error: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl NearbyResponse {
    /// Build the response from aggregated stops.
    pub fn new(origin: &Coordinate, updated_at: String, stops: &[StopDepartures]) -> Self {
        Self {
            origin: OriginResult {
                lat: origin.latitude(),
                lon: origin.longitude(),
            },
            updated_at,
            stops: stops.iter().map(StopResult::from_departures).collect(),
            message: if stops.is_empty() {
                Some("No stops found nearby. Try a larger radius.".to_string())
            } else {
                None
            },
        }
    }
}

impl RouteResult {
    /// Create from the joined route detail.
    pub fn from_info(route: &RouteInfo) -> Self {
        Self {
            route_id: route.id.clone(),
            name: route.display_name().to_string(),
            long_name: route.long_name.clone(),
            color: route.color.clone(),
            type_label: route
                .route_type
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            direction_names: route.direction_names.clone(),
        }
    }
}

impl StopResult {
    /// Create from an aggregated stop.
    pub fn from_departures(departures: &StopDepartures) -> Self {
        let predictions: Vec<PredictionResult> = departures
            .departures
            .iter()
            .map(PredictionResult::from_option)
            .collect();

        let leave_in_minutes = departures
            .departures
            .iter()
            .find_map(|d| d.leave_by.map(|lb| lb.leave_in_minutes()));

        Self {
            stop_id: departures.stop.id.clone(),
            name: departures.stop.name.clone(),
            platform_code: departures.stop.platform_code.clone(),
            description: departures.stop.description.clone(),
            distance_m: departures.stop.distance_m.round() as i64,
            walk_seconds: departures.walk.seconds,
            walk_minutes: departures.walk.minutes(),
            walk_source: departures.walk.source,
            degraded: departures.degraded,
            has_predictions: !predictions.is_empty(),
            routes: departures.routes.iter().map(RouteResult::from_info).collect(),
            leave_in_minutes,
            predictions,
        }
    }
}

impl PredictionResult {
    /// Create from a departure option.
    pub fn from_option(option: &DepartureOption) -> Self {
        let prediction = &option.prediction;

        Self {
            route_id: prediction.route.id.clone(),
            route_name: prediction.route.display_name().to_string(),
            route_long_name: prediction.route.long_name.clone(),
            route_color: prediction.route.color.clone(),
            route_type_label: prediction
                .route
                .route_type
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            headsign: prediction.headsign.clone(),
            direction_name: prediction.direction_name.clone(),
            status: prediction.status.clone(),
            departure_time: prediction.effective_departure().map(|t| t.to_rfc3339()),
            departs_in_minutes: option.leave_by.map(|lb| lb.departs_in_minutes()),
            leave_in_minutes: option.leave_by.map(|lb| lb.leave_in_minutes()),
            too_late: option.leave_by.map(|lb| lb.too_late),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Prediction, RouteInfo, RouteType, Stop, WalkEstimate};
    use crate::nearby::leave_by;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn make_departures() -> StopDepartures {
        let stop = Stop {
            id: "place-pktrm".into(),
            name: "Park Street".into(),
            coordinate: Coordinate::new(42.35639, -71.06249).unwrap(),
            distance_m: 421.7,
            platform_code: None,
            description: None,
        };

        let walk = WalkEstimate {
            seconds: 240,
            source: WalkSource::Heuristic,
        };

        let prediction = Prediction {
            stop_id: "place-pktrm".into(),
            route: RouteInfo {
                id: "Red".into(),
                short_name: String::new(),
                long_name: "Red Line".into(),
                route_type: Some(RouteType(1)),
                color: "DA291C".into(),
                direction_names: vec!["Southbound".into(), "Northbound".into()],
            },
            headsign: "Alewife".into(),
            direction_name: "Northbound".into(),
            arrival_time: None,
            departure_time: Some(now() + Duration::minutes(10)),
            status: None,
        };

        let lb = leave_by(&prediction, &walk, now());
        let routes = vec![prediction.route.clone()];
        StopDepartures {
            stop,
            walk,
            routes,
            degraded: false,
            departures: vec![DepartureOption {
                prediction,
                leave_by: lb,
            }],
        }
    }

    #[test]
    fn stop_result_fields() {
        let result = StopResult::from_departures(&make_departures());

        assert_eq!(result.stop_id, "place-pktrm");
        assert_eq!(result.name, "Park Street");
        assert_eq!(result.distance_m, 422);
        assert_eq!(result.walk_seconds, 240);
        assert_eq!(result.walk_minutes, 4.0);
        assert_eq!(result.walk_source, WalkSource::Heuristic);
        assert!(!result.degraded);
        assert!(result.has_predictions);
        assert_eq!(result.leave_in_minutes, Some(6.0));
    }

    #[test]
    fn prediction_result_fields() {
        let result = StopResult::from_departures(&make_departures());
        let pred = &result.predictions[0];

        assert_eq!(pred.route_id, "Red");
        assert_eq!(pred.route_name, "Red Line");
        assert_eq!(pred.route_type_label, "Subway");
        assert_eq!(pred.headsign, "Alewife");
        assert_eq!(pred.direction_name, "Northbound");
        assert_eq!(pred.departs_in_minutes, Some(10.0));
        assert_eq!(pred.leave_in_minutes, Some(6.0));
        assert_eq!(pred.too_late, Some(false));
        assert!(pred.departure_time.is_some());
    }

    #[test]
    fn stop_result_lists_serving_routes() {
        let result = StopResult::from_departures(&make_departures());

        assert_eq!(result.routes.len(), 1);
        let route = &result.routes[0];
        assert_eq!(route.route_id, "Red");
        assert_eq!(route.name, "Red Line");
        assert_eq!(route.type_label, "Subway");
        assert_eq!(route.color, "DA291C");
        assert_eq!(route.direction_names, vec!["Southbound", "Northbound"]);
    }

    #[test]
    fn empty_stop_list_carries_advisory_message() {
        let origin = Coordinate::new(42.3601, -71.0589).unwrap();
        let response = NearbyResponse::new(&origin, now().to_rfc3339(), &[]);

        assert_eq!(
            response.message.as_deref(),
            Some("No stops found nearby. Try a larger radius.")
        );

        // And the message is omitted entirely when stops exist.
        let response = NearbyResponse::new(&origin, now().to_rfc3339(), &[make_departures()]);
        assert!(response.message.is_none());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("\"message\""));
    }

    #[test]
    fn degraded_stop_has_no_predictions() {
        let mut departures = make_departures();
        departures.degraded = true;
        departures.departures.clear();

        let result = StopResult::from_departures(&departures);
        assert!(result.degraded);
        assert!(!result.has_predictions);
        assert!(result.leave_in_minutes.is_none());
        assert!(result.predictions.is_empty());
    }

    #[tokio::test]
    async fn end_to_end_contract_with_mock() {
        use crate::nearby::{nearby_departures, NearbyConfig};
        use crate::transit::MockTransitClient;
        use crate::walk::WalkTimeEstimator;

        let origin = Coordinate::new(42.3601, -71.0589).unwrap();
        let stop = Stop {
            id: "place-pktrm".into(),
            name: "Park Street".into(),
            coordinate: Coordinate::new(42.35639, -71.06249).unwrap(),
            distance_m: 0.0,
            platform_code: None,
            description: None,
        };

        let prediction = Prediction {
            stop_id: "place-pktrm".into(),
            route: RouteInfo {
                id: "Red".into(),
                long_name: "Red Line".into(),
                ..Default::default()
            },
            headsign: "Alewife".into(),
            direction_name: String::new(),
            arrival_time: None,
            departure_time: Some(now() + Duration::minutes(15)),
            status: None,
        };

        let mock = MockTransitClient::new()
            .with_stop(stop)
            .with_predictions("place-pktrm", vec![prediction.clone()])
            .with_routes("place-pktrm", vec![prediction.route.clone()]);

        let config = NearbyConfig::default();
        let stops = nearby_departures(
            &mock,
            &WalkTimeEstimator::new(None),
            &config,
            origin,
            config.default_radius,
            now(),
        )
        .await
        .unwrap();

        let response = NearbyResponse::new(&origin, now().to_rfc3339(), &stops);
        assert!(response.stops.len() <= config.max_stops);

        // Every entry carries the contract fields.
        let json = serde_json::to_value(&response).unwrap();
        let entry = &json["stops"][0];
        assert_eq!(entry["name"], "Park Street");
        assert!(entry["distance_m"].is_i64());
        assert!(entry["leave_in_minutes"].is_number());
        assert!(entry["predictions"][0]["too_late"].is_boolean());
        assert_eq!(entry["routes"][0]["name"], "Red Line");
    }

    #[test]
    fn nearby_response_round_trips_origin() {
        let origin = Coordinate::new(42.3601, -71.0589).unwrap();
        let response = NearbyResponse::new(&origin, now().to_rfc3339(), &[make_departures()]);

        assert_eq!(response.origin.lat, 42.3601);
        assert_eq!(response.origin.lon, -71.0589);
        assert_eq!(response.stops.len(), 1);

        // Must serialize cleanly for the JSON contract.
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"walk_source\":\"heuristic\""));
        assert!(json.contains("\"leave_in_minutes\":6.0"));
    }
}
