//! Error types for the chaojiying library.

use thiserror::Error;

/// Main error type for the chaojiying library.
#[derive(Error, Debug)]
pub enum ChaojiyingError {
    /// HTTP request failed (connection, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body is not the expected JSON envelope
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// The service answered with a nonzero `err_no`.
    ///
    /// Displays as the service's own `err_str`, unchanged, so callers can
    /// match on it.
    #[error("{message}")]
    Service { code: i64, message: String },

    /// Proxy URL rejected by the HTTP transport
    #[error("Invalid proxy URL {url:?}: {source}")]
    InvalidProxy {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Endpoint URL could not be built
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChaojiyingError {
    /// Whether the request was cut off by the configured timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ChaojiyingError::Http(e) if e.is_timeout())
    }

    /// The service error code, if this is a service error.
    pub fn service_code(&self) -> Option<i64> {
        match self {
            ChaojiyingError::Service { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Result type alias for chaojiying operations.
pub type Result<T> = std::result::Result<T, ChaojiyingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_displays_remote_message() {
        let err = ChaojiyingError::Service {
            code: -1911,
            message: "账户余额不足".into(),
        };
        assert_eq!(err.to_string(), "账户余额不足");
        assert_eq!(err.service_code(), Some(-1911));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_json_error_is_not_service_error() {
        let err: ChaojiyingError = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, ChaojiyingError::Json(_)));
        assert_eq!(err.service_code(), None);
    }
}
