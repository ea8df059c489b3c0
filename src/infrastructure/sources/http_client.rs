//! # HTTP Client Utilities
//!
//! Shared HTTP client wrapper for source adapters and the external proxy
//! route.
//!
//! This module provides a reusable HTTP client wrapper with:
//! - A per-client timeout
//! - Default headers (used for upstream credentials)
//! - JSON deserialization
//! - Status code to [`SourceError`] mapping
//!
//! # Examples
//!
//! ```ignore
//! use drug_price_gateway::infrastructure::sources::http_client::HttpClient;
//!
//! let client = HttpClient::new(5000)?;
//! let response: serde_json::Value = client.get("https://api.example.com/prices").await?;
//! ```

use crate::infrastructure::sources::error::{SourceError, SourceResultType};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest upstream error body echoed into an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// Inner reqwest client.
    client: Client,
    /// Request timeout in milliseconds.
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the specified timeout.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Request timeout in milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if the client cannot be created.
    pub fn new(timeout_ms: u64) -> SourceResultType<Self> {
        Self::with_headers(timeout_ms, HeaderMap::new())
    }

    /// Creates a new HTTP client sending `default_headers` on every request.
    ///
    /// # Arguments
    ///
    /// * `timeout_ms` - Request timeout in milliseconds.
    /// * `default_headers` - Headers included in all requests.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Internal` if the client cannot be created.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> SourceResultType<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| SourceError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Timeout` or `SourceError::Connection` if the
    /// request fails, and a status-specific error for non-2xx answers.
    /// Returns `SourceError::Protocol` if the body cannot be parsed.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> SourceResultType<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Makes a GET request with query parameters and deserializes the JSON
    /// response.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request.
    /// * `params` - Pairs appended as the query string.
    ///
    /// # Errors
    ///
    /// Same as [`HttpClient::get`].
    pub async fn get_with_params<T: DeserializeOwned, P: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        params: &P,
    ) -> SourceResultType<T> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        self.handle_response(response).await
    }

    /// Handles the HTTP response, checking status and deserializing JSON.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> SourceResultType<T> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| self.map_body_error(e))
        } else {
            let retry_after_ms = retry_after_ms(response.headers());
            let error_body = response.text().await.unwrap_or_default();
            Err(map_status_error(status, &error_body, retry_after_ms))
        }
    }

    /// Maps a reqwest error raised while sending a request.
    fn map_reqwest_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout_with_duration(
                format!("request timed out after {}ms", self.timeout_ms),
                self.timeout_ms,
            )
        } else if error.is_connect() {
            SourceError::connection(format!("Connection failed: {}", error))
        } else {
            SourceError::connection(format!("HTTP request failed: {}", error))
        }
    }

    /// Maps a reqwest error raised while reading a 2xx body.
    fn map_body_error(&self, error: reqwest::Error) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout_with_duration(
                format!("response body timed out after {}ms", self.timeout_ms),
                self.timeout_ms,
            )
        } else {
            SourceError::protocol(format!("Failed to parse response: {}", error))
        }
    }
}

/// Maps a non-2xx status to a SourceError.
fn map_status_error(status: StatusCode, body: &str, retry_after_ms: Option<u64>) -> SourceError {
    let body = truncate(body);
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            SourceError::invalid_request(format!("Bad request ({}): {}", status, body))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SourceError::authentication(format!("Authentication failed ({}): {}", status, body))
        }
        StatusCode::TOO_MANY_REQUESTS => {
            SourceError::rate_limited("Rate limit exceeded", retry_after_ms)
        }
        s if s.is_server_error() => {
            SourceError::connection(format!("Server error ({}): {}", status, body))
        }
        _ => SourceError::protocol(format!("HTTP error ({}): {}", status, body)),
    }
}

/// Reads a `Retry-After` header given in seconds.
fn retry_after_ms(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(|secs| secs.saturating_mul(1000))
}

fn truncate(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let mut out: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        out.push_str("...");
        out
    } else {
        body.to_string()
    }
}
