//! # Entities
//!
//! Per-request result types. All of them are built fresh for each query and
//! dropped once the response is written.
//!
//! - [`SourcePayload`]: opaque data returned by one source
//! - [`SourceResult`]: success payload or embedded failure
//! - [`PricingData`]: ordered per-source result map
//! - [`AggregateResponse`]: the merged response for one query

pub mod aggregate_response;
pub mod source_result;

pub use aggregate_response::{AggregateResponse, PricingData};
pub use source_result::{SourcePayload, SourceResult, UNKNOWN_ERROR_MESSAGE};
