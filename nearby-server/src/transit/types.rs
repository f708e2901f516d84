//! MBTA v3 API response DTOs.
//!
//! The MBTA API speaks JSON:API: every response wraps resources in
//! `data`, side-loads related resources in `included`, and links them
//! through `relationships`. These types map that envelope directly;
//! `Option` is used liberally because the API omits fields freely.

use serde::Deserialize;

/// Response from `GET /stops`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopsResponse {
    /// Stop resources, sorted by distance when requested.
    pub data: Vec<StopResource>,
}

/// A single stop resource.
#[derive(Debug, Clone, Deserialize)]
pub struct StopResource {
    /// Upstream stop identifier.
    pub id: String,

    /// Stop attributes.
    pub attributes: StopAttributes,
}

/// Attributes of a stop resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopAttributes {
    /// Human-readable name.
    pub name: Option<String>,

    /// Latitude in degrees.
    pub latitude: Option<f64>,

    /// Longitude in degrees.
    pub longitude: Option<f64>,

    /// Platform code, for platform-level stops.
    pub platform_code: Option<String>,

    /// Free-text description.
    pub description: Option<String>,
}

/// Response from `GET /routes?filter[stop]=...`.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesResponse {
    /// Route resources serving the filtered stop.
    pub data: Vec<RouteResource>,
}

/// A single route resource.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    /// Upstream route identifier.
    pub id: String,

    /// Route attributes.
    pub attributes: RouteAttributes,
}

/// Response from `GET /predictions?include=route,trip`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionsResponse {
    /// Prediction resources, sorted by time when requested.
    pub data: Vec<PredictionResource>,

    /// Side-loaded route and trip resources.
    pub included: Option<Vec<IncludedResource>>,
}

/// A single prediction resource.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResource {
    /// Upstream prediction identifier.
    pub id: String,

    /// Prediction attributes.
    pub attributes: PredictionAttributes,

    /// Links to the stop, route, and trip this prediction is for.
    pub relationships: Option<Relationships>,
}

/// Attributes of a prediction resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PredictionAttributes {
    /// Predicted arrival time (ISO 8601 with offset).
    pub arrival_time: Option<String>,

    /// Predicted departure time (ISO 8601 with offset).
    pub departure_time: Option<String>,

    /// Direction of travel (index into the route's direction_names).
    pub direction_id: Option<usize>,

    /// Status string shown on boards ("Now boarding").
    pub status: Option<String>,
}

/// Relationship links on a prediction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationships {
    pub stop: Option<Relationship>,
    pub route: Option<Relationship>,
    pub trip: Option<Relationship>,
}

/// A single relationship; `data` is null when the link is absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    pub data: Option<ResourceId>,
}

/// A bare resource identifier inside a relationship.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceId {
    pub id: String,
}

/// A side-loaded resource from `included`.
///
/// Attributes are kept as raw JSON and decoded per `kind` during
/// conversion, so unknown included types never fail the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct IncludedResource {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub attributes: serde_json::Value,
}

/// Attributes of an included route resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteAttributes {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub color: Option<String>,

    #[serde(rename = "type")]
    pub route_type: Option<i64>,

    pub direction_names: Option<Vec<String>>,
}

/// Attributes of an included trip resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TripAttributes {
    pub headsign: Option<String>,
    pub direction_id: Option<usize>,
}
