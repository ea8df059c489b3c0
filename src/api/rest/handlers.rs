//! # REST Handlers
//!
//! Request handlers and the shared application state.

use crate::api::rest::error::ApiError;
use crate::application::services::PriceAggregator;
use crate::application::validation;
use crate::domain::entities::AggregateResponse;
use crate::infrastructure::config::GatewayConfig;
use crate::infrastructure::sources::error::SourceResultType;
use crate::infrastructure::sources::factory::build_sources;
use crate::infrastructure::sources::http_client::HttpClient;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::header::ALLOW;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Methods advertised by `OPTIONS /example`.
pub const EXAMPLE_ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,PATCH,OPTIONS";

/// Upstream behind the `/external` route.
#[derive(Debug, Clone)]
pub struct ExternalApi {
    client: HttpClient,
    url: String,
}

impl ExternalApi {
    /// Creates the external upstream handle.
    #[must_use]
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

/// Immutable state shared by all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    aggregator: Arc<PriceAggregator>,
    external: Arc<ExternalApi>,
}

impl AppState {
    /// Creates the state from already-built parts.
    #[must_use]
    pub fn new(aggregator: PriceAggregator, external: ExternalApi) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            external: Arc::new(external),
        }
    }

    /// Builds sources and the external client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if an adapter or HTTP client cannot be
    /// created.
    pub fn from_config(config: &GatewayConfig) -> SourceResultType<Self> {
        let sources = build_sources(&config.sources)?;
        let client = HttpClient::new(config.external.timeout_ms)?;
        Ok(Self::new(
            PriceAggregator::new(sources),
            ExternalApi::new(client, config.external.url.clone()),
        ))
    }
}

/// Health check body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"OK"`.
    pub status: String,
}

/// `GET /healthCheck`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
    })
}

/// `GET /drugPrices`
///
/// Validates the query, then fans out to every source. Source failures are
/// embedded in the 200 response; only a fault in the aggregator itself yields
/// a 500.
pub async fn drug_prices(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<AggregateResponse>, ApiError> {
    let query = validation::validate(&params)?;
    let response = state.aggregator.aggregate(&query).await?;
    Ok(Json(response))
}

/// `GET /external`
///
/// Returns the upstream JSON unchanged.
pub async fn external(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let body = state
        .external
        .client
        .get::<Value>(&state.external.url)
        .await
        .map_err(ApiError::External)?;
    Ok(Json(body))
}

/// `GET /example`
pub async fn example_get() -> &'static str {
    "GET request received"
}

/// `POST /example`
pub async fn example_post() -> &'static str {
    "POST request received"
}

/// `PUT /example`
pub async fn example_put() -> &'static str {
    "PUT request received"
}

/// `DELETE /example`
pub async fn example_delete() -> &'static str {
    "DELETE request received"
}

/// `PATCH /example`
pub async fn example_patch() -> &'static str {
    "PATCH request received"
}

/// `OPTIONS /example`
pub async fn example_options() -> impl IntoResponse {
    ([(ALLOW, EXAMPLE_ALLOWED_METHODS)], "OPTIONS request received")
}
