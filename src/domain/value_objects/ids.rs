//! # Identifiers
//!
//! String-based identifiers for pricing sources.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a pricing source, e.g. `"source1"`.
///
/// Used as the key of the source's entry in the aggregated response.
///
/// # Examples
///
/// ```
/// use drug_price_gateway::domain::value_objects::SourceId;
///
/// let id = SourceId::new("source1");
/// assert_eq!(id.as_str(), "source1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    /// Creates a new source identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased form used as an environment variable prefix
    /// (`source1` becomes `SOURCE1`).
    #[must_use]
    pub fn env_prefix(&self) -> String {
        self.0
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SourceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_prefix_uppercases_and_replaces_separators() {
        assert_eq!(SourceId::new("source1").env_prefix(), "SOURCE1");
        assert_eq!(SourceId::new("good-rx.v2").env_prefix(), "GOOD_RX_V2");
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&SourceId::new("source3")).unwrap_or_default();
        assert_eq!(json, "\"source3\"");
    }
}
