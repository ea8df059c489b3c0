//! # Application Services
//!
//! - [`PriceAggregator`]: concurrent fan-out to pricing sources and merge

pub mod price_aggregation;

pub use price_aggregation::{AggregationError, AggregationResultType, PriceAggregator};
