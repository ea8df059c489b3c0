//! # Aggregate Response
//!
//! The merged answer for one price query.

use crate::domain::entities::source_result::SourceResult;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{PriceQuery, SourceId};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Per-source results in configuration order.
///
/// Serializes as a JSON object whose keys appear in insertion order, so the
/// shape of a response never depends on which source finished first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingData {
    entries: Vec<(SourceId, SourceResult)>,
}

impl PricingData {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` sources.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends the result for a source.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::DuplicateSource`] if the source already has an
    /// entry.
    pub fn insert(&mut self, source_id: SourceId, result: SourceResult) -> Result<(), DomainError> {
        if self.contains(&source_id) {
            return Err(DomainError::DuplicateSource(source_id));
        }
        self.entries.push((source_id, result));
        Ok(())
    }

    /// Returns true if the source has an entry.
    #[must_use]
    pub fn contains(&self, source_id: &SourceId) -> bool {
        self.entries.iter().any(|(id, _)| id == source_id)
    }

    /// Returns the result recorded for a source.
    #[must_use]
    pub fn get(&self, source_id: &str) -> Option<&SourceResult> {
        self.entries
            .iter()
            .find(|(id, _)| id.as_str() == source_id)
            .map(|(_, result)| result)
    }

    /// Iterates over entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&SourceId, &SourceResult)> {
        self.entries.iter().map(|(id, result)| (id, result))
    }

    /// Number of sources recorded.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no source is recorded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of sources that answered successfully.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.entries.iter().filter(|(_, r)| r.is_success()).count()
    }

    /// Number of sources that failed.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }
}

impl Serialize for PricingData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(id, result)| (id.as_str(), result)))
    }
}

/// Merged response for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResponse {
    #[serde(flatten)]
    query: PriceQuery,
    pricing_data: PricingData,
}

impl AggregateResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(query: PriceQuery, pricing_data: PricingData) -> Self {
        Self {
            query,
            pricing_data,
        }
    }

    /// Returns the query this response answers.
    #[inline]
    #[must_use]
    pub fn query(&self) -> &PriceQuery {
        &self.query
    }

    /// Returns the per-source results.
    #[inline]
    #[must_use]
    pub fn pricing_data(&self) -> &PricingData {
        &self.pricing_data
    }

    /// Lowest price reported by any successful source, with its source.
    #[must_use]
    pub fn best_price(&self) -> Option<(&SourceId, Decimal)> {
        self.pricing_data
            .iter()
            .filter_map(|(id, result)| result.payload()?.price().map(|p| (id, p)))
            .min_by(|a, b| a.1.cmp(&b.1))
    }
}
