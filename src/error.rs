//! Error types for the Configuration Aggregator client
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! [`Error::kind`] collapses the variants into the coarse classes callers
//! usually branch on.

use thiserror::Error;

/// The main error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Service Errors
    // ============================================================================
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        status: u16,
        message: String,
        body: String,
    },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("No more pages available")]
    Exhausted,

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad client configuration or request parameters
    Config,
    /// Credentials were rejected or could not be obtained
    Auth,
    /// Network or connection failure
    Transport,
    /// Non-2xx or malformed response from the service
    Service,
    /// A paginator was advanced past its last page
    Exhausted,
    /// Local I/O failure
    Io,
    /// Anything else
    Other,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::InvalidUrl(_) => ErrorKind::Config,
            Error::Auth { .. } => ErrorKind::Auth,
            Error::Http(e) if e.is_decode() => ErrorKind::Service,
            Error::Http(_) | Error::Timeout { .. } => ErrorKind::Transport,
            Error::HttpStatus { .. } | Error::Decode { .. } | Error::JsonParse(_) => {
                ErrorKind::Service
            }
            Error::Exhausted => ErrorKind::Exhausted,
            Error::Io(_) => ErrorKind::Io,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// HTTP status code, if the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable: 429 and every 5xx except 501
pub(crate) fn is_retryable_status(status: u16) -> bool {
    status == 429 || ((500..600).contains(&status) && status != 501)
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("APIKEY");
        assert_eq!(err.to_string(), "Missing required config field: APIKEY");

        let err = Error::http_status(404, "Instance not found", "{}");
        assert_eq!(err.to_string(), "HTTP 404: Instance not found");

        assert_eq!(Error::Exhausted.to_string(), "No more pages available");
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::config("x").kind(), ErrorKind::Config);
        assert_eq!(Error::invalid_value("limit", "x").kind(), ErrorKind::Config);
        assert_eq!(Error::auth("x").kind(), ErrorKind::Auth);
        assert_eq!(Error::Timeout { timeout_ms: 5 }.kind(), ErrorKind::Transport);
        assert_eq!(Error::http_status(500, "", "").kind(), ErrorKind::Service);
        assert_eq!(Error::decode("bad json").kind(), ErrorKind::Service);
        assert_eq!(Error::Exhausted.kind(), ErrorKind::Exhausted);
    }

    #[test_case(429, true)]
    #[test_case(500, true)]
    #[test_case(501, false)]
    #[test_case(502, true)]
    #[test_case(503, true)]
    #[test_case(504, true)]
    #[test_case(400, false)]
    #[test_case(401, false)]
    #[test_case(404, false)]
    fn test_is_retryable_status(status: u16, expected: bool) {
        assert_eq!(Error::http_status(status, "", "").is_retryable(), expected);
    }

    #[test]
    fn test_non_http_errors_not_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(!Error::config("test").is_retryable());
        assert!(!Error::Exhausted.is_retryable());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::http_status(403, "", "").status(), Some(403));
        assert_eq!(Error::Exhausted.status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
