//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use tracing::error;

use crate::domain::Coordinate;
use crate::nearby::{nearby_departures, NearbyError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/nearby", get(nearby))
        .with_state(state)
}

/// Health check: reports credential presence and probes the transit API.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (transit_status, transit_error) = match state.transit.probe().await {
        Ok(status) => (Some(status), None),
        Err(e) => (None, Some(e.to_string())),
    };

    Json(HealthResponse {
        ok: transit_status.is_some_and(|s| s < 500),
        transit_key_set: state.transit_key_set,
        routing_key_set: state.walker.has_routing(),
        transit_status,
        transit_error,
    })
}

/// Nearby stops with predictions, walk estimates, and leave-by times.
async fn nearby(
    State(state): State<AppState>,
    Query(req): Query<NearbyRequest>,
) -> Result<Json<NearbyResponse>, AppError> {
    // Validate the coordinate at the boundary; out-of-range input
    // never reaches the aggregation flow.
    let origin = Coordinate::new(req.lat, req.lon).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let radius = req.radius.unwrap_or(state.config.default_radius);
    if !(radius.is_finite() && radius > 0.0) {
        return Err(AppError::BadRequest {
            message: "radius must be a positive number".to_string(),
        });
    }

    let now = Utc::now();
    let stops = nearby_departures(
        state.transit.as_ref(),
        &state.walker,
        &state.config,
        origin,
        radius,
        now,
    )
    .await?;

    Ok(Json(NearbyResponse::new(
        &origin,
        now.to_rfc3339(),
        &stops,
    )))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    RateLimited,
    Upstream { message: String },
}

impl From<NearbyError> for AppError {
    fn from(e: NearbyError) -> Self {
        if e.is_rate_limited() {
            AppError::RateLimited
        } else {
            AppError::Upstream {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "transit API rate limit hit, try again shortly".to_string(),
            ),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message.clone()),
        };

        error!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
