//! # HTTP Source
//!
//! Source adapter backed by an upstream pricing API.
//!
//! Each query becomes `GET {base_url}?drugName=..&zipCode=..`. When an API key
//! is configured it is sent as a default header on every request; the key is
//! never logged.
//!
//! # Examples
//!
//! ```
//! use drug_price_gateway::infrastructure::sources::http_source::{HttpSource, HttpSourceConfig};
//!
//! let config = HttpSourceConfig::new("source1", "https://prices.example.com/v1/quote")
//!     .with_api_key("secret")
//!     .with_timeout_ms(2500);
//! let source = HttpSource::new(config).expect("valid config");
//! ```

use crate::domain::entities::SourcePayload;
use crate::domain::value_objects::{PriceQuery, SourceId};
use crate::infrastructure::sources::error::{SourceError, SourceResultType};
use crate::infrastructure::sources::http_client::HttpClient;
use crate::infrastructure::sources::traits::{SourceAdapter, SourceKind};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::fmt;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Default header carrying the API key.
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// Transport settings for one HTTP source.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    source_id: SourceId,
    base_url: String,
    api_key: Option<String>,
    api_key_header: String,
    timeout_ms: u64,
}

impl HttpSourceConfig {
    /// Creates a configuration with default timeout and no credentials.
    ///
    /// # Arguments
    ///
    /// * `source_id` - Key of this source in the response.
    /// * `base_url` - Endpoint queried with `drugName` and `zipCode`.
    #[must_use]
    pub fn new(source_id: impl Into<SourceId>, base_url: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            base_url: base_url.into(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Sets the API key sent with every request.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the header name used for the API key.
    #[must_use]
    pub fn with_api_key_header(mut self, header: impl Into<String>) -> Self {
        self.api_key_header = header.into();
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Returns the source identifier.
    #[must_use]
    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    /// Returns the request timeout in milliseconds.
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    fn default_headers(&self) -> SourceResultType<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(key) = &self.api_key {
            let name = HeaderName::from_bytes(self.api_key_header.as_bytes()).map_err(|e| {
                SourceError::internal(format!(
                    "invalid API key header name '{}': {}",
                    self.api_key_header, e
                ))
            })?;
            let mut value = HeaderValue::from_str(key)
                .map_err(|e| SourceError::internal(format!("invalid API key value: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

impl fmt::Debug for HttpSourceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpSourceConfig")
            .field("source_id", &self.source_id)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_header", &self.api_key_header)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Source adapter calling an upstream HTTP API.
#[derive(Debug, Clone)]
pub struct HttpSource {
    source_id: SourceId,
    base_url: String,
    client: HttpClient,
}

impl HttpSource {
    /// Builds the adapter and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if the credential header is invalid or
    /// the client cannot be created.
    pub fn new(config: HttpSourceConfig) -> SourceResultType<Self> {
        let headers = config.default_headers()?;
        let client = HttpClient::with_headers(config.timeout_ms, headers)?;
        Ok(Self {
            source_id: config.source_id,
            base_url: config.base_url,
            client,
        })
    }
}

#[async_trait]
impl SourceAdapter for HttpSource {
    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Http
    }

    fn timeout_ms(&self) -> u64 {
        self.client.timeout_ms()
    }

    async fn fetch(&self, query: &PriceQuery) -> SourceResultType<SourcePayload> {
        let params = [
            ("drugName", query.drug_name()),
            ("zipCode", query.zip_code()),
        ];
        let body: Value = self.client.get_with_params(&self.base_url, &params).await?;
        Ok(SourcePayload::new(body))
    }
}
