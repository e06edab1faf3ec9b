//! Provider search adapters and the merging aggregator.
//!
//! Each adapter queries one upstream provider and maps its response schema to
//! the normalized [`MediaRecord`] shape. Providers degrade rather than crash:
//! a missing credential, transport failure, or unexpected response shape turns
//! into a warning and an empty contribution, never an error for the caller.

mod coverr;
mod pexels;
mod wikimedia;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{MediaRecord, Provider};
use std::sync::Arc;
use thiserror::Error;

/// Why a single provider contributed no results to a search
#[derive(Debug, Error)]
pub(crate) enum ProviderError {
    /// No credential configured for a provider that requires one
    #[error("no API key configured")]
    MissingCredential,

    /// Request failed at the transport level or returned a non-2xx status
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response parsed but did not have the expected shape
    #[error("unexpected response shape: {0}")]
    BadShape(String),
}

/// Merges search results from all configured providers.
///
/// Videos come from Pexels and Coverr (queried concurrently, Pexels results
/// first); images come from Wikimedia Commons and Pexels (Wikimedia first).
/// The merged list is capped at the configured `max_results`.
#[derive(Clone)]
pub struct SearchAggregator {
    config: Arc<Config>,
    http_client: reqwest::Client,
}

impl SearchAggregator {
    /// Create an aggregator with its own HTTP client.
    ///
    /// Search requests are short and bounded by the configured search timeout,
    /// unlike the download client which must stream large bodies.
    pub fn new(config: Arc<Config>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.providers.search_timeout)
            .user_agent(concat!("stock-dl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Search all video providers and merge their results
    pub async fn search_videos(&self, query: &str) -> Vec<MediaRecord> {
        let (pexels, coverr) = tokio::join!(
            pexels::search_videos(&self.http_client, &self.config.providers.pexels, query),
            coverr::search_videos(&self.http_client, &self.config.providers.coverr, query),
        );

        let mut records = self.flatten(Provider::Pexels, pexels);
        records.extend(self.flatten(Provider::Coverr, coverr));
        records.truncate(self.config.providers.max_results);

        tracing::debug!(query, results = records.len(), "video search merged");
        records
    }

    /// Search all image providers and merge their results
    pub async fn search_images(&self, query: &str) -> Vec<MediaRecord> {
        let (wikimedia, pexels) = tokio::join!(
            wikimedia::search_images(&self.http_client, &self.config.providers.wikimedia, query),
            pexels::search_images(&self.http_client, &self.config.providers.pexels, query),
        );

        let mut records = self.flatten(Provider::Wikimedia, wikimedia);
        records.extend(self.flatten(Provider::Pexels, pexels));
        records.truncate(self.config.providers.max_results);

        tracing::debug!(query, results = records.len(), "image search merged");
        records
    }

    /// Collapse one provider's result into its contribution, warning on failure
    fn flatten(
        &self,
        provider: Provider,
        result: std::result::Result<Vec<MediaRecord>, ProviderError>,
    ) -> Vec<MediaRecord> {
        match result {
            Ok(records) => records,
            Err(ProviderError::MissingCredential) => {
                tracing::debug!(provider = %provider, "provider skipped, no credential configured");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(provider = %provider, error = %e, "provider search failed");
                Vec::new()
            }
        }
    }
}
