//! Conversion from MBTA API DTOs to domain types.
//!
//! The predictions endpoint side-loads route and trip resources; this
//! module joins them back onto each prediction so downstream code sees
//! a flat, fully-described `Prediction`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::{Coordinate, Prediction, RouteInfo, RouteType, Stop};

use super::types::{
    IncludedResource, PredictionsResponse, RouteAttributes, RoutesResponse, StopsResponse,
    TripAttributes,
};

/// Convert a stops response into domain stops, with distance from `origin`.
///
/// Stops without a usable coordinate are skipped; the API occasionally
/// returns parent stations with null positions.
pub fn convert_stops(response: &StopsResponse, origin: &Coordinate) -> Vec<Stop> {
    response
        .data
        .iter()
        .filter_map(|resource| {
            let attrs = &resource.attributes;
            let coordinate = Coordinate::new(attrs.latitude?, attrs.longitude?).ok()?;

            Some(
                Stop {
                    id: resource.id.clone(),
                    name: attrs.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                    coordinate,
                    distance_m: 0.0,
                    platform_code: attrs.platform_code.clone(),
                    description: attrs.description.clone(),
                }
                .with_distance_from(origin),
            )
        })
        .collect()
}

/// Convert a routes response into domain route info.
pub fn convert_routes(response: &RoutesResponse) -> Vec<RouteInfo> {
    response
        .data
        .iter()
        .map(|resource| route_info(&resource.id, Some(&resource.attributes)))
        .collect()
}

/// Convert a predictions response into domain predictions for one stop.
///
/// Joins the side-loaded route and trip resources, resolves the
/// direction name, and parses timestamps. Output is ordered by
/// effective departure ascending; predictions with no time at all sort
/// last. An empty result is a valid outcome.
pub fn convert_predictions(response: &PredictionsResponse, stop_id: &str) -> Vec<Prediction> {
    let (routes, trips) = index_included(response.included.as_deref().unwrap_or_default());

    let mut predictions: Vec<Prediction> = response
        .data
        .iter()
        .map(|resource| {
            let attrs = &resource.attributes;
            let rels = resource.relationships.clone().unwrap_or_default();

            let route_id = relationship_id(&rels.route);
            let trip_id = relationship_id(&rels.trip);

            let route = route_id
                .as_deref()
                .map(|id| route_info(id, routes.get(id)))
                .unwrap_or_default();

            let trip = trip_id
                .as_deref()
                .and_then(|id| trips.get(id))
                .cloned()
                .unwrap_or_default();

            let direction_id = trip.direction_id.or(attrs.direction_id);
            let direction_name = direction_id
                .and_then(|d| route.direction_names.get(d))
                .cloned()
                .unwrap_or_default();

            Prediction {
                stop_id: stop_id.to_string(),
                route,
                headsign: trip.headsign.unwrap_or_default(),
                direction_name,
                arrival_time: parse_time(attrs.arrival_time.as_deref()),
                departure_time: parse_time(attrs.departure_time.as_deref()),
                status: attrs.status.clone(),
            }
        })
        .collect();

    // The API sorts by time when asked, but re-sorting makes the
    // ordering a local guarantee rather than an upstream one.
    predictions.sort_by_key(|p| (p.effective_departure().is_none(), p.effective_departure()));
    predictions
}

/// Index the `included` resources by id, split by kind.
fn index_included(
    included: &[IncludedResource],
) -> (
    HashMap<String, RouteAttributes>,
    HashMap<String, TripAttributes>,
) {
    let mut routes = HashMap::new();
    let mut trips = HashMap::new();

    for resource in included {
        match resource.kind.as_str() {
            "route" => {
                if let Ok(attrs) =
                    serde_json::from_value::<RouteAttributes>(resource.attributes.clone())
                {
                    routes.insert(resource.id.clone(), attrs);
                }
            }
            "trip" => {
                if let Ok(attrs) =
                    serde_json::from_value::<TripAttributes>(resource.attributes.clone())
                {
                    trips.insert(resource.id.clone(), attrs);
                }
            }
            _ => {}
        }
    }

    (routes, trips)
}

fn relationship_id(rel: &Option<super::types::Relationship>) -> Option<String> {
    rel.as_ref()?.data.as_ref().map(|d| d.id.clone())
}

fn route_info(id: &str, attrs: Option<&RouteAttributes>) -> RouteInfo {
    let attrs = attrs.cloned().unwrap_or_default();
    RouteInfo {
        id: id.to_string(),
        short_name: attrs.short_name.unwrap_or_default(),
        long_name: attrs.long_name.unwrap_or_default(),
        route_type: attrs.route_type.map(RouteType),
        color: attrs.color.unwrap_or_default(),
        direction_names: attrs.direction_names.unwrap_or_default(),
    }
}

/// Parse an MBTA timestamp (RFC 3339 with offset) into UTC.
///
/// Malformed timestamps become `None` rather than failing the whole
/// response; a single bad prediction should not take out the request.
fn parse_time(s: Option<&str>) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(s?).ok()?;
    Some(parsed.with_timezone(&Utc))
}
