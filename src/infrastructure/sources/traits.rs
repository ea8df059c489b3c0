//! # Source Adapter Trait
//!
//! Port definition for pricing source integrations.
//!
//! The aggregator only ever sees [`SourceAdapter`]; whether a source is an
//! HTTP API or a static stand-in is decided when the adapters are built.
//!
//! # Examples
//!
//! ```ignore
//! use drug_price_gateway::infrastructure::sources::traits::SourceAdapter;
//!
//! struct MySource { /* ... */ }
//!
//! #[async_trait::async_trait]
//! impl SourceAdapter for MySource {
//!     // ... implement required methods
//! }
//! ```

use crate::domain::entities::SourcePayload;
use crate::domain::value_objects::{PriceQuery, SourceId};
use crate::infrastructure::sources::error::SourceResultType;
use async_trait::async_trait;
use std::fmt;

/// Kind of adapter, for logs and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Backed by an upstream HTTP API.
    Http,
    /// Returns configured mock data.
    Static,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Static => write!(f, "static"),
        }
    }
}

/// Interface every pricing source implements.
///
/// # Contract
///
/// - `fetch` is a pure read; calling it twice with the same query has no
///   side effects upstream.
/// - Adapters own their transport settings and share no mutable state with
///   other adapters.
/// - Failures are reported through the returned `Result`; an adapter must
///   not rely on panicking to signal an error.
#[async_trait]
pub trait SourceAdapter: Send + Sync + fmt::Debug {
    /// Returns the source identifier.
    fn source_id(&self) -> &SourceId;

    /// Returns the adapter kind.
    fn kind(&self) -> SourceKind;

    /// Returns the timeout in milliseconds for one fetch.
    fn timeout_ms(&self) -> u64;

    /// Fetches price data for a query.
    ///
    /// # Arguments
    ///
    /// * `query` - The validated drug name and zip code.
    ///
    /// # Errors
    ///
    /// - `SourceError::Timeout` - Request timed out
    /// - `SourceError::Connection` - Network failure or upstream 5xx
    /// - `SourceError::Authentication` - Credentials rejected
    /// - `SourceError::Protocol` - Unexpected status or body
    async fn fetch(&self, query: &PriceQuery) -> SourceResultType<SourcePayload>;
}
