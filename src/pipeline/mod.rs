//! Core acquisition pipeline split into focused submodules.
//!
//! The `MediaAcquirer` struct and its methods are organized by domain:
//! - [`batch`] - Batch validation, bounded fan-out, outcome aggregation
//! - [`acquire`] - Per-item download → trim → persist steps
//! - [`telemetry`] - Best-effort provider usage reporting

mod acquire;
mod batch;
mod telemetry;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
pub(crate) mod test_helpers;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::transcode::{FfmpegTranscoder, Transcoder, UnavailableTranscoder};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Main acquisition pipeline instance (cloneable - all fields are Arc-wrapped)
///
/// Owns the HTTP client used for downloads and telemetry, the transcoder used
/// for video trimming, and a shutdown token that cancels in-flight batches.
#[derive(Clone)]
pub struct MediaAcquirer {
    /// Configuration (wrapped in Arc for sharing across tasks)
    pub(crate) config: Arc<Config>,
    /// HTTP client shared by all downloads and telemetry calls
    pub(crate) http_client: reqwest::Client,
    /// Video trimmer (trait object for pluggable implementations)
    pub(crate) transcoder: Arc<dyn Transcoder>,
    /// Cancelled on shutdown; aborts in-flight item acquisitions
    pub(crate) shutdown: CancellationToken,
}

impl MediaAcquirer {
    /// Create a new MediaAcquirer instance
    ///
    /// This initializes the core components:
    /// - Creates the data root directory if absent
    /// - Builds the shared HTTP client
    /// - Selects a transcoder (explicit path, PATH discovery, or a stub when
    ///   no ffmpeg is available)
    pub async fn new(config: Config) -> Result<Self> {
        let transcoder = select_transcoder(&config);
        Self::with_transcoder(config, transcoder).await
    }

    /// Create a MediaAcquirer with an explicit transcoder implementation
    ///
    /// Used by tests to inject mock transcoders; also useful for embedding
    /// applications that ship their own trimming tool.
    pub async fn with_transcoder(config: Config, transcoder: Arc<dyn Transcoder>) -> Result<Self> {
        // Ensure the data root exists before accepting any batch
        tokio::fs::create_dir_all(&config.storage.data_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create data directory '{}': {}",
                        config.storage.data_dir.display(),
                        e
                    ),
                ))
            })?;

        // One client for downloads and telemetry. No overall request timeout:
        // media downloads are long-lived streams; connect failures still
        // surface promptly via the connect timeout.
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(30))
            .user_agent(concat!("stock-dl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        tracing::info!(
            transcoder = transcoder.name(),
            available = transcoder.is_available(),
            data_dir = %config.storage.data_dir.display(),
            "Acquisition pipeline initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            http_client,
            transcoder,
            shutdown: CancellationToken::new(),
        })
    }

    /// Get the current configuration
    ///
    /// The configuration is wrapped in an Arc, so this is a cheap clone.
    pub fn get_config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Request shutdown: cancel in-flight item acquisitions.
    ///
    /// Per-item temp files are cleaned up as their tasks unwind; no partial
    /// output is left at a final destination path.
    pub fn shutdown(&self) {
        tracing::info!("Shutdown requested, cancelling in-flight acquisitions");
        self.shutdown.cancel();
    }

    /// Whether shutdown has been requested
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Whether a working transcoder was selected at construction time
    pub fn transcoder_available(&self) -> bool {
        self.transcoder.is_available()
    }

    /// Clone of the shutdown token, for tasks that should stop with this
    /// acquirer (e.g. the API server's graceful shutdown)
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Spawn the REST API server in a background task
    ///
    /// The server runs concurrently with batch processing and listens on the
    /// configured bind address (default: 127.0.0.1:7655).
    pub fn spawn_api_server(self: &Arc<Self>) -> tokio::task::JoinHandle<Result<()>> {
        let acquirer = self.clone();
        let config = self.config.clone();

        tokio::spawn(async move { crate::api::start_api_server(acquirer, config).await })
    }
}

/// Pick the transcoder implementation for the given configuration
fn select_transcoder(config: &Config) -> Arc<dyn Transcoder> {
    if let Some(ref ffmpeg_path) = config.transcode.ffmpeg_path {
        // Use explicitly configured binary path
        Arc::new(FfmpegTranscoder::new(ffmpeg_path.clone()))
    } else if config.transcode.search_path {
        // Search PATH for an ffmpeg binary
        FfmpegTranscoder::from_path()
            .map(|t| Arc::new(t) as Arc<dyn Transcoder>)
            .unwrap_or_else(|| {
                tracing::warn!("ffmpeg not found in PATH, video trimming is unavailable");
                Arc::new(UnavailableTranscoder)
            })
    } else {
        // No binary configured and PATH search disabled
        Arc::new(UnavailableTranscoder)
    }
}
