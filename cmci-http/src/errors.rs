//! HTTP error types

/// Error type for transport-level failures
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("HTTP {status} {status_text}")]
    Status {
        status: u16,
        status_text: String,
        /// Raw response body sent with the failure
        cause_errors: String,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(String),

    #[error("Invalid value for header {0}")]
    InvalidHeaderValue(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HttpError {
    /// Detail body reported alongside the failure, if the server sent one
    pub fn cause_errors(&self) -> Option<&str> {
        match self {
            HttpError::Status { cause_errors, .. } if !cause_errors.is_empty() => {
                Some(cause_errors.as_str())
            }
            _ => None,
        }
    }

    /// HTTP status code of the failure, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
