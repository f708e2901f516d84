//! openrouteservice walking-directions client.

use serde::Deserialize;

use crate::domain::Coordinate;

use super::error::RoutingError;

/// Default base URL for openrouteservice.
const DEFAULT_BASE_URL: &str = "https://api.openrouteservice.org";

/// Wrapper for the directions response (GeoJSON feature collection).
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Debug, Deserialize)]
struct Properties {
    summary: Summary,
}

/// Minimal summary DTO - we only need the duration.
#[derive(Debug, Deserialize)]
struct Summary {
    /// Route duration in seconds.
    duration: f64,
}

/// Configuration for the routing client.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// API key, passed as a query parameter.
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RoutingConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 5,
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

/// Client for the openrouteservice directions API.
#[derive(Debug, Clone)]
pub struct RoutingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RoutingClient {
    /// Create a new routing client.
    pub fn new(config: RoutingConfig) -> Result<Self, RoutingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Walking duration between two coordinates, in seconds.
    ///
    /// openrouteservice takes coordinates as `lon,lat` pairs, the
    /// reverse of the usual lat/lon order.
    pub async fn walking_seconds(
        &self,
        origin: &Coordinate,
        dest: &Coordinate,
    ) -> Result<i64, RoutingError> {
        let url = format!("{}/v2/directions/foot-walking", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.api_key.clone()),
                (
                    "start",
                    format!("{},{}", origin.longitude(), origin.latitude()),
                ),
                ("end", format!("{},{}", dest.longitude(), dest.latitude())),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RoutingError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| RoutingError::Json {
                message: e.to_string(),
            })?;

        let duration = parsed
            .features
            .first()
            .map(|f| f.properties.summary.duration)
            .ok_or(RoutingError::NoRoute)?;

        Ok(duration.round() as i64)
    }
}
