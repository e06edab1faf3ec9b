//! # stock-dl
//!
//! Backend library for stock-media search and acquisition applications.
//!
//! ## Design Philosophy
//!
//! stock-dl is designed to be:
//! - **Provider-agnostic** - Pexels, Coverr, and Wikimedia Commons results
//!   share one normalized record shape
//! - **Failure-isolating** - One bad item never aborts the rest of its batch
//! - **Sensible defaults** - Works out of the box with zero configuration
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//!
//! ## Quick Start
//!
//! ```no_run
//! use stock_dl::{Config, MediaAcquirer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.providers.pexels.api_key = Some("your-pexels-key".to_string());
//!
//!     let acquirer = Arc::new(MediaAcquirer::new(config).await?);
//!
//!     // Serve the REST API (search + batch download) until shutdown
//!     acquirer.spawn_api_server();
//!
//!     stock_dl::run_with_shutdown(&acquirer).await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Core acquisition pipeline (decomposed into focused submodules)
pub mod pipeline;
/// Provider search adapters and the merging aggregator
pub mod providers;
/// Video trimming via an external transcoder
pub mod transcode;
/// Core types
pub mod types;
/// Utility functions
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AcquireError, ApiError, Error, ErrorDetail, Result, ToHttpStatus, TranscodeError};
pub use pipeline::MediaAcquirer;
pub use providers::SearchAggregator;
pub use transcode::{FfmpegTranscoder, Transcoder, UnavailableTranscoder};
pub use types::{
    Batch, BatchSummary, ItemFailure, ItemOutcome, ItemStatus, MediaItem, MediaKind, MediaRecord,
    Provider,
};

/// Helper function to run the acquirer with graceful signal handling.
///
/// Waits for a termination signal and then calls the acquirer's `shutdown()`
/// method, which cancels in-flight acquisitions and stops the API server.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use stock_dl::{Config, MediaAcquirer, run_with_shutdown};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let acquirer = Arc::new(MediaAcquirer::new(Config::default()).await?);
///     acquirer.spawn_api_server();
///
///     run_with_shutdown(&acquirer).await;
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(acquirer: &MediaAcquirer) {
    wait_for_signal().await;
    acquirer.shutdown();
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
