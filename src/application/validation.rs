//! # Request Validation
//!
//! Turns raw query parameters into a [`PriceQuery`] before any source is
//! contacted.

use crate::domain::errors::ValidationError;
use crate::domain::value_objects::PriceQuery;
use std::collections::HashMap;

/// Query parameter holding the drug name.
pub const DRUG_NAME_PARAM: &str = "drugName";

/// Query parameter holding the zip code.
pub const ZIP_CODE_PARAM: &str = "zipCode";

/// Validates raw query parameters.
///
/// Both `drugName` and `zipCode` must be present and non-blank. Other
/// parameters are ignored.
///
/// # Errors
///
/// Returns [`ValidationError::MissingParameter`] naming the first missing
/// parameter.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use drug_price_gateway::application::validation::validate;
///
/// let mut params = HashMap::new();
/// params.insert("drugName".to_string(), "Lisinopril".to_string());
/// assert!(validate(&params).is_err());
///
/// params.insert("zipCode".to_string(), "95355".to_string());
/// let query = validate(&params).expect("both present");
/// assert_eq!(query.zip_code(), "95355");
/// ```
pub fn validate(params: &HashMap<String, String>) -> Result<PriceQuery, ValidationError> {
    let drug_name = params
        .get(DRUG_NAME_PARAM)
        .ok_or(ValidationError::missing(DRUG_NAME_PARAM))?;
    let zip_code = params
        .get(ZIP_CODE_PARAM)
        .ok_or(ValidationError::missing(ZIP_CODE_PARAM))?;

    PriceQuery::new(drug_name, zip_code)
}
