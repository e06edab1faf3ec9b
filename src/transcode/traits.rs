//! Transcoder trait for time-window trimming

use crate::error::TranscodeError;
use async_trait::async_trait;
use std::path::Path;

/// Trait for trimming a video file to a time window.
///
/// The acquisition pipeline calls this exactly once per video item, after the
/// raw download completes and before the result is finalized. Implementations
/// must write the trimmed output to `output` and leave `input` untouched; the
/// pipeline owns temp-file cleanup on every path.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Trim `input` to the window `[start, start + duration)` seconds,
    /// writing the result to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the transcoder cannot be spawned, exits non-zero,
    /// or is not available on this system.
    async fn trim(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<(), TranscodeError>;

    /// Whether this implementation can actually trim on this system
    fn is_available(&self) -> bool;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
