//! # Price Query
//!
//! The validated pair of parameters every source is asked about.

use crate::domain::errors::ValidationError;
use serde::Serialize;
use std::fmt;

/// A drug price lookup for one postal code.
///
/// # Invariants
///
/// - `drug_name` and `zip_code` are non-empty and carry no surrounding
///   whitespace.
///
/// No further format checks are applied: a zip code is any non-blank string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    drug_name: String,
    zip_code: String,
}

impl PriceQuery {
    /// Creates a query, trimming both values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingParameter`] if either value is blank.
    pub fn new(drug_name: &str, zip_code: &str) -> Result<Self, ValidationError> {
        let drug_name = drug_name.trim();
        if drug_name.is_empty() {
            return Err(ValidationError::missing("drugName"));
        }
        let zip_code = zip_code.trim();
        if zip_code.is_empty() {
            return Err(ValidationError::missing("zipCode"));
        }

        Ok(Self {
            drug_name: drug_name.to_string(),
            zip_code: zip_code.to_string(),
        })
    }

    /// Returns the drug name.
    #[inline]
    #[must_use]
    pub fn drug_name(&self) -> &str {
        &self.drug_name
    }

    /// Returns the zip code.
    #[inline]
    #[must_use]
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }
}

impl fmt::Display for PriceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PriceQuery({} @ {})", self.drug_name, self.zip_code)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn trims_values() {
        let query = PriceQuery::new("  Lisinopril ", " 95355\t").unwrap();
        assert_eq!(query.drug_name(), "Lisinopril");
        assert_eq!(query.zip_code(), "95355");
    }

    #[test]
    fn blank_drug_name_rejected() {
        let err = PriceQuery::new("   ", "95355").unwrap_err();
        assert_eq!(err.parameter(), "drugName");
    }

    #[test]
    fn blank_zip_code_rejected() {
        let err = PriceQuery::new("Lisinopril", "").unwrap_err();
        assert_eq!(err.parameter(), "zipCode");
    }

    #[test]
    fn zip_code_format_is_not_checked() {
        assert!(PriceQuery::new("Lisinopril", "not-a-zip").is_ok());
    }

    #[test]
    fn display() {
        let query = PriceQuery::new("Metformin", "10001").unwrap();
        assert_eq!(query.to_string(), "PriceQuery(Metformin @ 10001)");
    }
}
