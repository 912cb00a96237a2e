//! Error types for the LMS client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the LMS client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Check if this error was raised at construction time
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config { .. })
    }

    /// Upstream HTTP status code, when the failure carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the LMS client
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::Timeout { timeout_ms: 20000 };
        assert_eq!(err.to_string(), "Request timeout after 20000ms");
    }

    #[test]
    fn test_is_config() {
        assert!(Error::config("bad origin").is_config());
        assert!(!Error::http_status(500, "").is_config());
        assert!(!Error::Timeout { timeout_ms: 1 }.is_config());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::http_status(404, "Not found").status(), Some(404));
        assert_eq!(Error::http_status(503, "").status(), Some(503));
        assert_eq!(Error::config("x").status(), None);
        assert_eq!(Error::Timeout { timeout_ms: 1 }.status(), None);
    }
}
