//! # Price Aggregation
//!
//! Fans one price query out to every configured source and merges the
//! outcomes.
//!
//! Every source runs in its own tokio task, bounded by the adapter's own
//! timeout. The join waits for all tasks to settle and records each outcome
//! under the source's identifier in configuration order, so a slow, failing or
//! panicking source only ever affects its own entry.

use crate::domain::entities::{AggregateResponse, PricingData, SourceResult};
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{PriceQuery, SourceId};
use crate::infrastructure::sources::error::SourceError;
use crate::infrastructure::sources::traits::SourceAdapter;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{Instant, timeout};
use tracing::Instrument;

/// Fault in the aggregator's own control logic.
///
/// Source failures are never reported here; they are embedded in the
/// response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationError {
    /// Two adapters share an identifier.
    DuplicateSource(SourceId),
}

impl fmt::Display for AggregationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSource(id) => write!(f, "duplicate source identifier: {}", id),
        }
    }
}

impl std::error::Error for AggregationError {}

impl From<DomainError> for AggregationError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::DuplicateSource(id) => Self::DuplicateSource(id),
        }
    }
}

/// Result type for aggregation operations.
pub type AggregationResultType<T> = Result<T, AggregationError>;

/// Queries a fixed, ordered set of sources concurrently.
#[derive(Debug, Clone)]
pub struct PriceAggregator {
    sources: Vec<Arc<dyn SourceAdapter>>,
}

impl PriceAggregator {
    /// Creates an aggregator over `sources`, queried and reported in the
    /// given order.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { sources }
    }

    /// Returns the number of configured sources.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Queries every source and merges the results.
    ///
    /// The response always holds exactly one entry per source. Failing
    /// sources show up as failure entries; an all-failed result is still
    /// `Ok`.
    ///
    /// # Errors
    ///
    /// Returns [`AggregationError::DuplicateSource`] if two adapters share an
    /// identifier.
    #[tracing::instrument(
        name = "aggregate",
        skip(self, query),
        fields(drug = %query.drug_name(), zip = %query.zip_code(), sources = self.sources.len())
    )]
    pub async fn aggregate(&self, query: &PriceQuery) -> AggregationResultType<AggregateResponse> {
        let started = Instant::now();
        let outcomes = self.collect_from_sources(query).await;

        let mut pricing_data = PricingData::with_capacity(outcomes.len());
        for (source_id, result) in outcomes {
            pricing_data.insert(source_id, result)?;
        }

        let response = AggregateResponse::new(query.clone(), pricing_data);
        let data = response.pricing_data();
        tracing::info!(
            succeeded = data.success_count(),
            failed = data.failure_count(),
            best_price = ?response.best_price().map(|(_, price)| price),
            elapsed_ms = elapsed_ms(started),
            "price aggregation complete"
        );

        Ok(response)
    }

    /// Spawns one task per source, then awaits every handle in order.
    async fn collect_from_sources(&self, query: &PriceQuery) -> Vec<(SourceId, SourceResult)> {
        let mut handles = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let source = Arc::clone(source);
            let source_id = source.source_id().clone();
            let query = query.clone();
            let span = tracing::debug_span!("source", id = %source.source_id(), kind = %source.kind());

            let handle = tokio::spawn(
                async move {
                    let started = Instant::now();
                    let per_source_timeout = Duration::from_millis(source.timeout_ms());

                    let outcome = match timeout(per_source_timeout, source.fetch(&query)).await {
                        Ok(result) => result,
                        Err(_) => Err(SourceError::timeout_with_duration(
                            format!("source request timed out after {}ms", source.timeout_ms()),
                            source.timeout_ms(),
                        )),
                    };

                    match &outcome {
                        Ok(_) => tracing::debug!(elapsed_ms = elapsed_ms(started), "source answered"),
                        Err(e) => tracing::warn!(
                            error = %e,
                            elapsed_ms = elapsed_ms(started),
                            "source failed"
                        ),
                    }
                    outcome
                }
                .instrument(span),
            );

            handles.push((source_id, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (source_id, handle) in handles {
            let result = match handle.await {
                Ok(outcome) => SourceResult::from(outcome),
                Err(e) => {
                    tracing::error!(source = %source_id, error = %e, "source task panicked");
                    SourceResult::failure(format!("source task failed: {}", e))
                }
            };
            outcomes.push((source_id, result));
        }

        outcomes
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
