//! Routing API error types.

/// Errors that can occur when interacting with the routing API.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response contained no route between the two points
    #[error("no walking route found")]
    NoRoute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RoutingError::NoRoute;
        assert_eq!(err.to_string(), "no walking route found");

        let err = RoutingError::Api {
            status: 403,
            message: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "API error 403: quota exceeded");
    }
}
