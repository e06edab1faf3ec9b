//! Error types for stock-dl
//!
//! This module provides the error handling for the library, including:
//! - Domain-specific error types (Validation, Acquire, Transcode, etc.)
//! - HTTP status code mapping for API integration
//! - Structured error responses with machine-readable error codes
//!
//! Item-level errors ([`AcquireError`]) never propagate out of a batch; the
//! orchestrator captures them into the per-item outcome list. Only batch-fatal
//! conditions (invalid request, namespace directory creation failure) surface
//! as [`Error`] to callers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for stock-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for stock-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Structurally invalid request (empty batch, unusable namespace).
    /// Rejected before any I/O, no partial effects.
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable description of what is invalid
        message: String,
    },

    /// Item-level acquisition error (surfaced only when a single item is
    /// acquired directly, outside a batch)
    #[error("acquisition error: {0}")]
    Acquire(#[from] AcquireError),

    /// External transcoder error
    #[error("transcode error: {0}")]
    Transcode(#[from] TranscodeError),

    /// I/O error (batch-fatal when it affects the namespace directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Convenience constructor for validation failures
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}

/// Per-item acquisition errors.
///
/// Each variant is isolated to the offending item: it is recorded in that
/// item's outcome and the rest of the batch continues.
#[derive(Debug, Error)]
pub enum AcquireError {
    /// Download request failed at the transport level
    #[error("download from {url} failed: {reason}")]
    Transport {
        /// The URL that was being downloaded
        url: String,
        /// Transport-level failure reason
        reason: String,
    },

    /// Download request returned a non-2xx status
    #[error("download from {url} returned HTTP {status}")]
    HttpStatus {
        /// The URL that was being downloaded
        url: String,
        /// The HTTP status code returned
        status: u16,
    },

    /// Trim window is empty or inverted after clamping to `[0, duration]`
    #[error(
        "invalid trim range for {id}: start {start}s, end {end}s (duration {duration}s)"
    )]
    InvalidTrimRange {
        /// The item whose trim range is invalid
        id: String,
        /// Requested trim start in seconds
        start: f64,
        /// Requested trim end in seconds
        end: f64,
        /// Full asset duration in seconds
        duration: f64,
    },

    /// External transcoder failed for this item
    #[error("transcode failed: {0}")]
    Transcode(#[from] TranscodeError),

    /// Writing or finalizing the item's destination file failed
    #[error("filesystem error at {path}: {reason}")]
    Filesystem {
        /// The path being written or renamed
        path: PathBuf,
        /// The underlying failure reason
        reason: String,
    },

    /// The item was cancelled before completing (caller aborted the batch)
    #[error("acquisition cancelled")]
    Cancelled,
}

/// External transcoder errors (ffmpeg invocation)
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The transcoder binary could not be spawned
    #[error("failed to execute {binary}: {reason}")]
    Spawn {
        /// The binary that failed to start
        binary: String,
        /// Why it could not be spawned
        reason: String,
    },

    /// The transcoder ran but exited non-zero
    #[error("transcoder exited with code {code:?}: {stderr}")]
    Failed {
        /// Process exit code, when one was reported
        code: Option<i32>,
        /// Tail of the process stderr output
        stderr: String,
    },

    /// No transcoder binary is available on this system
    #[error("no transcoder binary available (ffmpeg not found)")]
    NotAvailable,
}

/// API error response format
///
/// # Example JSON Response
///
/// ```json
/// {
///   "error": {
///     "code": "validation_error",
///     "message": "batch contains no items",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// The error details
    pub error: ErrorDetail,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "validation_error")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional context about the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an API error with additional details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }

    /// Create a "validation error" error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("validation_error", message)
    }

    /// Create an "internal server error"
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("internal_error", message)
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - structurally invalid batch
            Error::Validation { .. } => 400,

            // 422 Unprocessable Entity - semantically invalid item
            Error::Acquire(AcquireError::InvalidTrimRange { .. }) => 422,

            // 502 Bad Gateway - upstream provider failures
            Error::Acquire(AcquireError::Transport { .. }) => 502,
            Error::Acquire(AcquireError::HttpStatus { .. }) => 502,
            Error::Network(_) => 502,

            // 503 Service Unavailable - external tool missing/broken
            Error::Transcode(_) => 503,
            Error::Acquire(AcquireError::Transcode(_)) => 503,

            // 500 Internal Server Error - everything else
            Error::Acquire(_) => 500,
            Error::Io(_) => 500,
            Error::Serialization(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Validation { .. } => "validation_error",
            Error::Acquire(e) => match e {
                AcquireError::Transport { .. } => "transport_error",
                AcquireError::HttpStatus { .. } => "upstream_http_error",
                AcquireError::InvalidTrimRange { .. } => "invalid_trim_range",
                AcquireError::Transcode(_) => "transcode_error",
                AcquireError::Filesystem { .. } => "filesystem_error",
                AcquireError::Cancelled => "cancelled",
            },
            Error::Transcode(_) => "transcode_error",
            Error::Io(_) => "io_error",
            Error::Network(_) => "network_error",
            Error::Serialization(_) => "serialization_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        let code = error.error_code().to_string();
        let message = error.to_string();

        // Add contextual details for specific error types
        let details = match &error {
            Error::Acquire(AcquireError::HttpStatus { url, status }) => {
                Some(serde_json::json!({
                    "url": url,
                    "status": status,
                }))
            }
            Error::Acquire(AcquireError::InvalidTrimRange {
                id,
                start,
                end,
                duration,
            }) => Some(serde_json::json!({
                "item_id": id,
                "trim_start": start,
                "trim_end": end,
                "duration": duration,
            })),
            Error::Acquire(AcquireError::Filesystem { path, .. }) => Some(serde_json::json!({
                "path": path,
            })),
            _ => None,
        };

        ApiError {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        }
    }
}
