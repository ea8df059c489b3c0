//! # Application Layer
//!
//! Request validation and the aggregation service.

pub mod services;
pub mod validation;

pub use services::{AggregationError, PriceAggregator};
pub use validation::validate;
