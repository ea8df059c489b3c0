//! # Drug Price Gateway
//!
//! HTTP gateway that asks several pharmacy pricing sources for the price of a
//! drug at a zip code and returns every answer side by side.
//!
//! ## Layers
//!
//! - [`domain`]: query, source identity and result types
//! - [`application`]: request validation and the concurrent [`PriceAggregator`]
//! - [`infrastructure`]: source adapters, configuration and logging
//! - [`api`]: axum routes and error mapping
//!
//! ## Failure model
//!
//! A source that fails, times out or panics is reported as
//! `{"error": "..."}` under its own key; the request as a whole still
//! succeeds. Only incomplete input (400) and faults in the aggregator itself
//! (500) change the status code.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::services::PriceAggregator;
pub use domain::{AggregateResponse, PriceQuery, SourceId, SourceResult};
pub use infrastructure::config::GatewayConfig;
