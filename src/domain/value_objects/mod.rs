//! # Value Objects
//!
//! - [`SourceId`]: string identifier of a configured pricing source
//! - [`PriceQuery`]: validated drug name and zip code pair

pub mod ids;
pub mod price_query;

pub use ids::SourceId;
pub use price_query::PriceQuery;
