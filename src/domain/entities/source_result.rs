//! # Source Results
//!
//! What a single pricing source contributed to an aggregated response.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Message used when a source failed without saying why.
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown error";

/// Data returned by a source, passed through to the caller untouched.
///
/// Sources do not share a schema. Most return at least a `price` and a
/// pharmacy name, but any JSON value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePayload(Value);

impl SourcePayload {
    /// Wraps a JSON value.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the underlying JSON value.
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the payload and returns the JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Reads a top-level `price` field, if the payload carries one.
    ///
    /// Numbers and numeric strings are both accepted.
    #[must_use]
    pub fn price(&self) -> Option<Decimal> {
        match self.0.get("price")? {
            Value::Number(n) => parse_decimal(&n.to_string()),
            Value::String(s) => parse_decimal(s.trim()),
            _ => None,
        }
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    s.parse()
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

impl From<Value> for SourcePayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Outcome of querying one source.
///
/// Serializes as the payload itself on success and as `{"error": "..."}` on
/// failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourceResult {
    /// The source answered.
    Success(SourcePayload),
    /// The source failed; the failure is reported in place of its data.
    Failure {
        /// Diagnostic message, never empty.
        #[serde(rename = "error")]
        message: String,
    },
}

impl SourceResult {
    /// Creates a failure entry. Blank messages become
    /// [`UNKNOWN_ERROR_MESSAGE`].
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self::Failure { message }
    }

    /// Returns true for a success entry.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the payload of a success entry.
    #[must_use]
    pub fn payload(&self) -> Option<&SourcePayload> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Failure { .. } => None,
        }
    }

    /// Returns the message of a failure entry.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { message } => Some(message),
        }
    }
}

impl<E: fmt::Display> From<Result<SourcePayload, E>> for SourceResult {
    fn from(result: Result<SourcePayload, E>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}
