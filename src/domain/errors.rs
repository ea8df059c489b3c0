//! # Domain Errors
//!
//! Errors raised while constructing domain values.

use crate::domain::value_objects::SourceId;
use thiserror::Error;

/// Message returned to clients when a required query parameter is absent.
pub const MISSING_PARAMETER_MESSAGE: &str = "Missing drugName or zipCode";

/// A price query could not be built from the inbound parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `drugName` or `zipCode` is absent or blank.
    #[error("Missing drugName or zipCode")]
    MissingParameter {
        /// Name of the first parameter found missing.
        parameter: &'static str,
    },
}

impl ValidationError {
    /// Creates a missing-parameter error.
    #[must_use]
    pub fn missing(parameter: &'static str) -> Self {
        Self::MissingParameter { parameter }
    }

    /// Returns the name of the offending parameter.
    #[must_use]
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::MissingParameter { parameter } => parameter,
        }
    }
}

/// Invariant violations inside domain collections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A source identifier was inserted twice into the same pricing map.
    #[error("duplicate source identifier: {0}")]
    DuplicateSource(SourceId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_display_matches_client_message() {
        let err = ValidationError::missing("zipCode");
        assert_eq!(err.to_string(), MISSING_PARAMETER_MESSAGE);
        assert_eq!(err.parameter(), "zipCode");
    }

    #[test]
    fn duplicate_source_display() {
        let err = DomainError::DuplicateSource(SourceId::new("source2"));
        assert_eq!(err.to_string(), "duplicate source identifier: source2");
    }
}
