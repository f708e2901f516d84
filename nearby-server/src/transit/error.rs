//! Failure modes of the transit API client.

use std::fmt;

/// What can go wrong talking to the transit API.
///
/// `RateLimited` and `Unauthorized` are split out from the generic
/// status-code case because the web layer handles them differently:
/// a rate limit is passed through to the caller as 429, and a bad key
/// is an operator problem worth a distinct message.
#[derive(Debug)]
pub enum TransitError {
    /// The request never got a response: connection refused, DNS
    /// failure, timeout.
    Http(reqwest::Error),

    /// The response arrived but was not the JSON we expected. Carries
    /// a snippet of the body when available, since upstream proxies
    /// sometimes answer with HTML error pages.
    Json {
        message: String,
        body: Option<String>,
    },

    /// A non-success status other than 401/403/429.
    ApiError { status: u16, message: String },

    /// 429 from upstream.
    RateLimited,

    /// 401 or 403 from upstream; the configured key is bad or missing.
    Unauthorized,
}

impl fmt::Display for TransitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitError::Http(e) => write!(f, "could not reach the transit API: {e}"),
            TransitError::Json { message, body } => match body {
                Some(body) => {
                    write!(f, "unreadable transit API response: {message}; body began {body}")
                }
                None => write!(f, "unreadable transit API response: {message}"),
            },
            TransitError::ApiError { status, message } => {
                write!(f, "transit API answered {status}: {message}")
            }
            TransitError::RateLimited => write!(f, "transit API rate limit reached"),
            TransitError::Unauthorized => write!(f, "transit API rejected the configured key"),
        }
    }
}

impl std::error::Error for TransitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransitError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransitError {
    fn from(err: reqwest::Error) -> Self {
        TransitError::Http(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_cases_render_distinctly() {
        let limited = TransitError::RateLimited.to_string();
        let rejected = TransitError::Unauthorized.to_string();
        let generic = TransitError::ApiError {
            status: 502,
            message: "Bad Gateway".into(),
        }
        .to_string();

        assert!(limited.contains("rate limit"));
        assert!(rejected.contains("key"));
        assert!(generic.contains("502"));
        assert!(generic.contains("Bad Gateway"));
        assert_ne!(limited, rejected);
    }

    #[test]
    fn json_error_includes_body_snippet_when_present() {
        let with_body = TransitError::Json {
            message: "expected value at line 1".into(),
            body: Some("<html>".into()),
        };
        assert!(with_body.to_string().contains("expected value"));
        assert!(with_body.to_string().contains("<html>"));

        let without = TransitError::Json {
            message: "expected value at line 1".into(),
            body: None,
        };
        assert!(!without.to_string().contains("body"));
    }

    #[test]
    fn only_http_has_a_source() {
        use std::error::Error;

        assert!(TransitError::RateLimited.source().is_none());
        assert!(TransitError::Unauthorized.source().is_none());
        assert!(TransitError::Json {
            message: String::new(),
            body: None,
        }
        .source()
        .is_none());
    }
}
