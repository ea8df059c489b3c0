//! # REST API
//!
//! HTTP endpoints using axum.
//!
//! # Endpoints
//!
//! - `GET /healthCheck` - Liveness probe, always `{"status":"OK"}`
//! - `GET /drugPrices?drugName=..&zipCode=..` - Prices from every source
//! - `GET /external` - Passthrough to the configured external API
//! - `/example` - Echoes the request method (GET, POST, PUT, DELETE, PATCH, OPTIONS)
//!
//! # Usage
//!
//! ```ignore
//! use drug_price_gateway::api::rest::{create_router, AppState};
//!
//! let state = AppState::from_config(&config)?;
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{AppState, HealthResponse};
pub use routes::{create_router, with_middleware};
