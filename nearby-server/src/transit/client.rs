//! MBTA v3 API HTTP client.
//!
//! Provides async methods for the two read-only queries this service
//! needs: stops near a coordinate and predictions for a stop. Handles
//! API-key authentication and mapping of upstream failures to typed
//! errors.

use reqwest::header::{HeaderMap, HeaderValue};

use crate::domain::{Coordinate, Prediction, RouteInfo, Stop};

use super::convert::{convert_predictions, convert_routes, convert_stops};
use super::error::TransitError;
use super::types::{PredictionsResponse, RoutesResponse, StopsResponse};
use super::TransitApi;

/// Default base URL for the MBTA v3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Configuration for the transit client.
///
/// Built once at startup from the process environment and passed in;
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// API key for authentication. May be empty: the API still answers
    /// unauthenticated requests, at tighter rate limits.
    pub api_key: String,
    /// Base URL for the API (defaults to production MBTA)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransitConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// MBTA v3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
}

impl MbtaClient {
    /// Create a new MBTA client with the given configuration.
    pub fn new(config: TransitConfig) -> Result<Self, TransitError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/vnd.api+json"),
        );

        // An absent key is allowed; requests just run at the
        // unauthenticated rate limit.
        if !config.api_key.is_empty() {
            let api_key =
                HeaderValue::from_str(&config.api_key).map_err(|_| TransitError::ApiError {
                    status: 0,
                    message: "Invalid API key format".to_string(),
                })?;
            headers.insert("x-api-key", api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Probe the API with a minimal query, returning the HTTP status.
    ///
    /// Used by the health endpoint; a non-2xx status is still a useful
    /// answer there, so it is not mapped to an error.
    pub async fn probe(&self) -> Result<u16, TransitError> {
        let url = format!("{}/stops", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("page[limit]", "1")])
            .send()
            .await?;
        Ok(response.status().as_u16())
    }

    async fn fetch_nearby_stops(
        &self,
        origin: &Coordinate,
        radius: f64,
        limit: usize,
    ) -> Result<Vec<Stop>, TransitError> {
        let url = format!("{}/stops", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("filter[latitude]", origin.latitude().to_string()),
                ("filter[longitude]", origin.longitude().to_string()),
                ("filter[radius]", radius.to_string()),
                ("sort", "distance".to_string()),
                ("page[limit]", limit.to_string()),
            ])
            .send()
            .await?;

        let body = check_status(response).await?;

        let parsed: StopsResponse =
            serde_json::from_str(&body).map_err(|e| TransitError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_stops(&parsed, origin))
    }

    async fn fetch_predictions(
        &self,
        stop_id: &str,
        limit: usize,
    ) -> Result<Vec<Prediction>, TransitError> {
        let url = format!("{}/predictions", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("filter[stop]", stop_id.to_string()),
                ("sort", "time".to_string()),
                ("page[limit]", limit.to_string()),
                ("include", "route,trip".to_string()),
            ])
            .send()
            .await?;

        let body = check_status(response).await?;

        let parsed: PredictionsResponse =
            serde_json::from_str(&body).map_err(|e| TransitError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_predictions(&parsed, stop_id))
    }

    async fn fetch_routes(&self, stop_id: &str) -> Result<Vec<RouteInfo>, TransitError> {
        let url = format!("{}/routes", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("filter[stop]", stop_id)])
            .send()
            .await?;

        let body = check_status(response).await?;

        let parsed: RoutesResponse =
            serde_json::from_str(&body).map_err(|e| TransitError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(convert_routes(&parsed))
    }
}

impl TransitApi for MbtaClient {
    async fn nearby_stops(
        &self,
        origin: &Coordinate,
        radius: f64,
        limit: usize,
    ) -> Result<Vec<Stop>, TransitError> {
        self.fetch_nearby_stops(origin, radius, limit).await
    }

    async fn predictions_for_stop(
        &self,
        stop_id: &str,
        limit: usize,
    ) -> Result<Vec<Prediction>, TransitError> {
        self.fetch_predictions(stop_id, limit).await
    }

    async fn routes_for_stop(&self, stop_id: &str) -> Result<Vec<RouteInfo>, TransitError> {
        self.fetch_routes(stop_id).await
    }
}

/// Map an upstream response to its body text, or a typed error.
async fn check_status(response: reqwest::Response) -> Result<String, TransitError> {
    let status = response.status();

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(TransitError::Unauthorized);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(TransitError::RateLimited);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TransitError::ApiError {
            status: status.as_u16(),
            message: body,
        });
    }

    Ok(response.text().await?)
}
