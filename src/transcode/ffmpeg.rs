//! CLI-based transcoder using an external ffmpeg binary

use super::traits::Transcoder;
use crate::error::TranscodeError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// How much stderr to keep when reporting a failed transcode
const STDERR_TAIL_BYTES: usize = 1024;

/// CLI-based transcoder using an external ffmpeg binary
///
/// Invokes `ffmpeg -nostdin -y -ss <start> -i <input> -t <duration> <output>`.
/// `-ss` before `-i` seeks on the input; `-y` overwrites the output path,
/// which the pipeline relies on for idempotent re-acquisition.
///
/// # Examples
///
/// ```no_run
/// use stock_dl::transcode::FfmpegTranscoder;
/// use std::path::PathBuf;
///
/// // Create with explicit path
/// let transcoder = FfmpegTranscoder::new(PathBuf::from("/usr/bin/ffmpeg"));
///
/// // Or auto-discover from PATH
/// let transcoder = FfmpegTranscoder::from_path()
///     .expect("ffmpeg not found in PATH");
/// ```
pub struct FfmpegTranscoder {
    binary_path: PathBuf,
}

impl FfmpegTranscoder {
    /// Create a new transcoder with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find ffmpeg in PATH
    ///
    /// Returns `Some(FfmpegTranscoder)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("ffmpeg").ok().map(Self::new)
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    async fn trim(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<(), TranscodeError> {
        let output_result = Command::new(&self.binary_path)
            .arg("-nostdin")
            .arg("-y")
            .arg("-ss")
            .arg(format!("{start}"))
            .arg("-i")
            .arg(input)
            .arg("-t")
            .arg(format!("{duration}"))
            .arg(output)
            .output()
            .await
            .map_err(|e| TranscodeError::Spawn {
                binary: self.binary_path.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output_result.status.success() {
            let stderr = String::from_utf8_lossy(&output_result.stderr);
            let tail_start = stderr.len().saturating_sub(STDERR_TAIL_BYTES);
            // Avoid splitting a UTF-8 character at the tail boundary
            let tail: String = stderr[..]
                .char_indices()
                .skip_while(|(i, _)| *i < tail_start)
                .map(|(_, c)| c)
                .collect();
            return Err(TranscodeError::Failed {
                code: output_result.status.code(),
                stderr: tail,
            });
        }

        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "cli-ffmpeg"
    }
}
