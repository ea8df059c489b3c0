//! # Source Errors
//!
//! Error types for source adapter operations.
//!
//! A `SourceError` never escapes the aggregator: it is turned into the
//! `{"error": ...}` entry for the failing source.
//!
//! # Examples
//!
//! ```
//! use drug_price_gateway::infrastructure::sources::error::SourceError;
//!
//! let error = SourceError::timeout_with_duration("no answer", 5000);
//! assert_eq!(error.timeout_ms(), Some(5000));
//! assert!(error.to_string().contains("timeout"));
//! ```

use thiserror::Error;

/// Error type for source adapter operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Request timed out.
    #[error("source timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
        /// Timeout duration in milliseconds.
        timeout_ms: Option<u64>,
    },

    /// Network or connection error, including upstream 5xx answers.
    #[error("source connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Credentials were rejected.
    #[error("source authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Upstream rate limit hit.
    #[error("source rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
        /// Retry-After hint in milliseconds.
        retry_after_ms: Option<u64>,
    },

    /// Upstream rejected the request parameters.
    #[error("source invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Unexpected status or undecodable body.
    #[error("source protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Adapter could not be built or failed internally.
    #[error("source internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl SourceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: None,
        }
    }

    /// Creates a timeout error with duration.
    #[must_use]
    pub fn timeout_with_duration(message: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            message: message.into(),
            timeout_ms: Some(timeout_ms),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>, retry_after_ms: Option<u64>) -> Self {
        Self::RateLimited {
            message: message.into(),
            retry_after_ms,
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns the timeout that expired, if known.
    #[must_use]
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            Self::Timeout { timeout_ms, .. } => *timeout_ms,
            _ => None,
        }
    }

    /// Returns the Retry-After hint in milliseconds, if any.
    #[must_use]
    pub fn retry_after_ms(&self) -> Option<u64> {
        match self {
            Self::RateLimited { retry_after_ms, .. } => *retry_after_ms,
            _ => None,
        }
    }
}

/// Result type for source operations.
pub type SourceResultType<T> = Result<T, SourceError>;
