//! # Gateway Configuration
//!
//! Process-scoped settings, loaded once at startup and passed by value into
//! the components that need them.
//!
//! Layers, later ones win:
//!
//! 1. Built-in defaults (port 3000, four static mock sources)
//! 2. Optional TOML file (`config/gateway.toml` unless a path is given)
//! 3. `GATEWAY__*` environment variables, e.g. `GATEWAY__SERVER__PORT`
//! 4. `PORT`, plus per-source `<ID>_BASE_URL`, `<ID>_API_KEY` and
//!    `<ID>_TIMEOUT_MS` (`SOURCE1_BASE_URL`, ...)
//!
//! # Examples
//!
//! ```
//! use drug_price_gateway::infrastructure::config::GatewayConfig;
//!
//! let config = GatewayConfig::from_toml_str(r#"
//!     [server]
//!     port = 8080
//!
//!     [[sources]]
//!     id = "source1"
//!     base_url = "https://prices.example.com/quote"
//! "#).expect("valid config");
//!
//! assert_eq!(config.server.port, 8080);
//! assert_eq!(config.sources.len(), 1);
//! ```

use crate::domain::value_objects::SourceId;
use crate::infrastructure::sources::http_source::{DEFAULT_API_KEY_HEADER, DEFAULT_TIMEOUT_MS};
use crate::infrastructure::sources::static_source::MockQuote;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const DEFAULT_PORT: u16 = 3000;

/// Config file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.toml";

/// Upstream used by the `/external` route.
pub const DEFAULT_EXTERNAL_URL: &str = "https://api.publicapis.org/entries";

/// Prefix of layered environment variables.
const ENV_PREFIX: &str = "GATEWAY";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration sources could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// An environment override has an unusable value.
    #[error("invalid value for {key}: {value}")]
    InvalidEnv {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },

    /// The merged configuration violates a constraint.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the `/external` passthrough route.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExternalSettings {
    /// URL fetched by `/external`.
    #[serde(default = "default_external_url")]
    pub url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ExternalSettings {
    fn default() -> Self {
        Self {
            url: default_external_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Settings for one pricing source.
///
/// A source with a `base_url` is served over HTTP; otherwise its `mock`
/// quote is returned.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SourceSettings {
    /// Identifier used as the response key.
    pub id: SourceId,
    /// Upstream endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Credential passed through to the upstream.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Header carrying `api_key`.
    #[serde(default = "default_api_key_header")]
    pub api_key_header: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Stand-in answer when no `base_url` is set.
    #[serde(default)]
    pub mock: Option<MockQuote>,
}

impl SourceSettings {
    /// Creates settings for a static source.
    #[must_use]
    pub fn mock(id: impl Into<SourceId>, quote: MockQuote) -> Self {
        Self {
            id: id.into(),
            base_url: None,
            api_key: None,
            api_key_header: default_api_key_header(),
            timeout_ms: default_timeout_ms(),
            mock: Some(quote),
        }
    }

    /// Returns true if this source calls an upstream API.
    #[must_use]
    pub fn is_http(&self) -> bool {
        self.base_url.is_some()
    }

    /// Applies `<ID>_BASE_URL`, `<ID>_API_KEY` and `<ID>_TIMEOUT_MS`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if the timeout is not a number.
    pub fn apply_env_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = self.id.env_prefix();

        if let Some(url) = non_blank(lookup(&format!("{prefix}_BASE_URL"))) {
            self.base_url = Some(url);
        }
        if let Some(key) = non_blank(lookup(&format!("{prefix}_API_KEY"))) {
            self.api_key = Some(key);
        }
        let timeout_key = format!("{prefix}_TIMEOUT_MS");
        if let Some(raw) = non_blank(lookup(&timeout_key)) {
            self.timeout_ms = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                key: timeout_key,
                value: raw,
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ConfigError::Invalid("source id must not be empty".into()));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid(format!(
                "source {}: timeout_ms must be positive",
                self.id
            )));
        }
        match &self.base_url {
            Some(url) => {
                let parsed = reqwest::Url::parse(url).map_err(|e| {
                    ConfigError::Invalid(format!("source {}: invalid base_url: {}", self.id, e))
                })?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(ConfigError::Invalid(format!(
                        "source {}: base_url must be http or https",
                        self.id
                    )));
                }
            }
            None if self.mock.is_none() => {
                return Err(ConfigError::Invalid(format!(
                    "source {}: needs either base_url or mock",
                    self.id
                )));
            }
            None => {}
        }
        Ok(())
    }
}

impl fmt::Debug for SourceSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceSettings")
            .field("id", &self.id)
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_key_header", &self.api_key_header)
            .field("timeout_ms", &self.timeout_ms)
            .field("mock", &self.mock)
            .finish()
    }
}

/// Complete gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GatewayConfig {
    /// Listener settings.
    #[serde(default)]
    pub server: ServerSettings,
    /// Pricing sources in response order.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceSettings>,
    /// `/external` route settings.
    #[serde(default)]
    pub external: ExternalSettings,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            sources: default_sources(),
            external: ExternalSettings::default(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from file and process environment.
    ///
    /// A missing file is only an error when `path` is given explicitly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be read, a value has the
    /// wrong type, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => File::from(p).format(FileFormat::Toml).required(true),
            None => File::with_name(DEFAULT_CONFIG_PATH)
                .format(FileFormat::Toml)
                .required(false),
        };

        let settings = base_builder()?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Self = settings.try_deserialize()?;
        config.apply_env_overrides(&|key: &str| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document on top of the defaults, without consulting the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if parsing or validation fails.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let settings = base_builder()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `PORT` and the per-source overrides.
    ///
    /// `PORT` is ignored when `GATEWAY__SERVER__PORT` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for unparseable numbers.
    pub fn apply_env_overrides<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup("GATEWAY__SERVER__PORT").is_none()
            && let Some(raw) = non_blank(lookup("PORT"))
        {
            self.server.port = raw.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "PORT".into(),
                value: raw,
            })?;
        }

        for source in &mut self.sources {
            source.apply_env_overrides(lookup)?;
        }
        Ok(())
    }

    /// Checks identifiers, timeouts and URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.sources.len());
        for source in &self.sources {
            source.validate()?;
            if !seen.insert(source.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate source id: {}",
                    source.id
                )));
            }
        }
        if self.external.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "external.timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("server.host", DEFAULT_HOST)?
        .set_default("server.port", i64::from(DEFAULT_PORT))?)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_external_url() -> String {
    DEFAULT_EXTERNAL_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

/// The four stand-in sources shipped by default.
#[must_use]
pub fn default_sources() -> Vec<SourceSettings> {
    [
        ("source1", Decimal::new(1299, 2)),
        ("source2", Decimal::new(1499, 2)),
        ("source3", Decimal::new(1149, 2)),
        ("source4", Decimal::new(1325, 2)),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (id, price))| {
        SourceSettings::mock(id, MockQuote::new(price, format!("Mock Pharmacy {}", i + 1)))
    })
    .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = GatewayConfig::from_toml_str("").unwrap();
        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.external.url, DEFAULT_EXTERNAL_URL);

        let ids: Vec<&str> = config.sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["source1", "source2", "source3", "source4"]);
        assert!(config.sources.iter().all(|s| !s.is_http()));
        assert_eq!(
            config.sources[1].mock,
            Some(MockQuote::new(Decimal::new(1499, 2), "Mock Pharmacy 2"))
        );
    }

    #[test]
    fn toml_sources_replace_defaults() {
        let config = GatewayConfig::from_toml_str(
            r#"
            [[sources]]
            id = "goodrx"
            base_url = "https://api.example.com/prices"
            api_key_header = "authorization"
            timeout_ms = 1200

            [[sources]]
            id = "stub"
            mock = { price = 9.99, pharmacy = "Corner Drugs" }
            "#,
        )
        .unwrap();

        assert_eq!(config.sources.len(), 2);
        assert!(config.sources[0].is_http());
        assert_eq!(config.sources[0].timeout_ms, 1200);
        assert_eq!(config.sources[0].api_key_header, "authorization");
        assert_eq!(config.sources[1].timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(
            config.sources[1].mock.as_ref().map(|m| m.price),
            Some(Decimal::new(999, 2))
        );
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = GatewayConfig::from_toml_str(
            r#"
            [[sources]]
            id = "a"
            mock = { price = 1.0, pharmacy = "A" }

            [[sources]]
            id = "a"
            mock = { price = 2.0, pharmacy = "B" }
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate source id"));
    }

    #[test]
    fn source_without_url_or_mock_rejected() {
        let err = GatewayConfig::from_toml_str(
            r#"
            [[sources]]
            id = "empty"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn non_http_base_url_rejected() {
        let err = GatewayConfig::from_toml_str(
            r#"
            [[sources]]
            id = "ftp"
            base_url = "ftp://example.com"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn env_overrides_turn_static_source_into_http() {
        let mut config = GatewayConfig::default();
        config
            .apply_env_overrides(&env(&[
                ("PORT", "8081"),
                ("SOURCE1_BASE_URL", "https://upstream.example.com/price"),
                ("SOURCE1_API_KEY", "k-123"),
                ("SOURCE1_TIMEOUT_MS", "900"),
            ]))
            .unwrap();
        config.validate().unwrap();

        assert_eq!(config.server.port, 8081);
        let source1 = &config.sources[0];
        assert!(source1.is_http());
        assert_eq!(source1.api_key.as_deref(), Some("k-123"));
        assert_eq!(source1.timeout_ms, 900);
        assert!(!config.sources[1].is_http());
    }

    #[test]
    fn layered_port_wins_over_plain_port() {
        let mut config = GatewayConfig::default();
        config
            .apply_env_overrides(&env(&[("GATEWAY__SERVER__PORT", "9000"), ("PORT", "8081")]))
            .unwrap();
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn bad_timeout_override_reported() {
        let mut config = GatewayConfig::default();
        let err = config
            .apply_env_overrides(&env(&[("SOURCE2_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == "SOURCE2_TIMEOUT_MS"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let mut settings = SourceSettings::mock("s", MockQuote::new(Decimal::ONE, "P"));
        settings.api_key = Some("hunter2".into());
        assert!(!format!("{:?}", settings).contains("hunter2"));
    }
}
