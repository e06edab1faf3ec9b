//! Stub transcoder for graceful degradation

use super::traits::Transcoder;
use crate::error::TranscodeError;
use async_trait::async_trait;
use std::path::Path;

/// Stub transcoder used when no ffmpeg binary is available
///
/// Every trim fails with [`TranscodeError::NotAvailable`], so video items
/// requiring a trim fail individually while image items (and the rest of the
/// process) continue to work.
///
/// # Examples
///
/// ```
/// use stock_dl::transcode::{Transcoder, UnavailableTranscoder};
///
/// let transcoder = UnavailableTranscoder;
/// assert!(!transcoder.is_available());
/// ```
pub struct UnavailableTranscoder;

#[async_trait]
impl Transcoder for UnavailableTranscoder {
    async fn trim(
        &self,
        _input: &Path,
        _start: f64,
        _duration: f64,
        _output: &Path,
    ) -> Result<(), TranscodeError> {
        Err(TranscodeError::NotAvailable)
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}
