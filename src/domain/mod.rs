//! # Domain Layer
//!
//! Core types of the price gateway: the validated query, source identities,
//! per-source results and the merged response.
//!
//! Nothing in this layer performs I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{AggregateResponse, PricingData, SourcePayload, SourceResult};
pub use errors::{DomainError, ValidationError};
pub use value_objects::{PriceQuery, SourceId};
