//! # Static Source
//!
//! Stand-in adapter that answers every query with a configured mock quote.

use crate::domain::entities::SourcePayload;
use crate::domain::value_objects::{PriceQuery, SourceId};
use crate::infrastructure::sources::error::{SourceError, SourceResultType};
use crate::infrastructure::sources::traits::{SourceAdapter, SourceKind};
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Mock price answer, serialized as `{"price": 14.99, "pharmacy": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockQuote {
    /// Quoted price, emitted as a JSON number.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Pharmacy name.
    pub pharmacy: String,
}

impl MockQuote {
    /// Creates a mock quote.
    #[must_use]
    pub fn new(price: Decimal, pharmacy: impl Into<String>) -> Self {
        Self {
            price,
            pharmacy: pharmacy.into(),
        }
    }
}

/// Source adapter returning fixed data without any I/O.
#[derive(Debug, Clone)]
pub struct StaticSource {
    source_id: SourceId,
    quote: MockQuote,
    timeout_ms: u64,
}

impl StaticSource {
    /// Creates a static source.
    ///
    /// # Arguments
    ///
    /// * `source_id` - Key of this source in the response.
    /// * `quote` - Answer returned for every query.
    /// * `timeout_ms` - Bound applied by the aggregator.
    #[must_use]
    pub fn new(source_id: impl Into<SourceId>, quote: MockQuote, timeout_ms: u64) -> Self {
        Self {
            source_id: source_id.into(),
            quote,
            timeout_ms,
        }
    }
}

#[async_trait]
impl SourceAdapter for StaticSource {
    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Static
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    async fn fetch(&self, _query: &PriceQuery) -> SourceResultType<SourcePayload> {
        serde_json::to_value(&self.quote)
            .map(SourcePayload::new)
            .map_err(|e| SourceError::internal(format!("failed to encode mock quote: {}", e)))
    }
}
