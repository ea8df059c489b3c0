//! # Pricing Sources
//!
//! Adapters for upstream pharmacy pricing providers.
//!
//! - [`traits`]: the [`SourceAdapter`] port
//! - [`http_source`]: adapter backed by an upstream HTTP API
//! - [`static_source`]: stand-in adapter returning mock quotes
//! - [`http_client`]: shared reqwest wrapper
//! - [`factory`]: builds adapters from configuration
//! - [`error`]: [`SourceError`]

pub mod error;
pub mod factory;
pub mod http_client;
pub mod http_source;
pub mod static_source;
pub mod traits;

pub use error::{SourceError, SourceResultType};
pub use factory::{build_source, build_sources};
pub use http_client::HttpClient;
pub use http_source::{HttpSource, HttpSourceConfig};
pub use static_source::{MockQuote, StaticSource};
pub use traits::{SourceAdapter, SourceKind};
