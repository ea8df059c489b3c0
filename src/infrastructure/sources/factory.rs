//! # Source Factory
//!
//! Turns [`SourceSettings`] into adapters, choosing the HTTP or static
//! implementation per source.

use crate::infrastructure::config::SourceSettings;
use crate::infrastructure::sources::error::{SourceError, SourceResultType};
use crate::infrastructure::sources::http_source::{HttpSource, HttpSourceConfig};
use crate::infrastructure::sources::static_source::StaticSource;
use crate::infrastructure::sources::traits::SourceAdapter;
use std::sync::Arc;

/// Builds one adapter.
///
/// # Errors
///
/// Returns `SourceError::Internal` if an HTTP adapter cannot be created or a
/// static source has no mock quote.
pub fn build_source(settings: &SourceSettings) -> SourceResultType<Arc<dyn SourceAdapter>> {
    match (&settings.base_url, &settings.mock) {
        (Some(base_url), _) => {
            let mut config = HttpSourceConfig::new(settings.id.clone(), base_url.clone())
                .with_api_key_header(settings.api_key_header.clone())
                .with_timeout_ms(settings.timeout_ms);
            if let Some(key) = &settings.api_key {
                config = config.with_api_key(key.clone());
            }
            Ok(Arc::new(HttpSource::new(config)?))
        }
        (None, Some(quote)) => Ok(Arc::new(StaticSource::new(
            settings.id.clone(),
            quote.clone(),
            settings.timeout_ms,
        ))),
        (None, None) => Err(SourceError::internal(format!(
            "source {} has neither base_url nor mock",
            settings.id
        ))),
    }
}

/// Builds all adapters, preserving order.
///
/// # Errors
///
/// Returns the first error from [`build_source`].
pub fn build_sources(settings: &[SourceSettings]) -> SourceResultType<Vec<Arc<dyn SourceAdapter>>> {
    settings.iter().map(build_source).collect()
}
