//! Shared test helpers for creating MediaAcquirer instances in tests.

use crate::config::Config;
use crate::error::TranscodeError;
use crate::pipeline::MediaAcquirer;
use crate::transcode::Transcoder;
use crate::types::{MediaItem, Provider};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// One recorded invocation of [`RecordingTranscoder::trim`]
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TrimCall {
    pub(crate) input: PathBuf,
    pub(crate) start: f64,
    pub(crate) duration: f64,
    pub(crate) output: PathBuf,
}

/// Transcoder that records its calls and copies input to output on success.
///
/// With `fail` set, every trim returns a failure without touching the output
/// path, mimicking an ffmpeg run that exits non-zero.
pub(crate) struct RecordingTranscoder {
    pub(crate) calls: Mutex<Vec<TrimCall>>,
    pub(crate) fail: bool,
}

impl RecordingTranscoder {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub(crate) fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub(crate) fn calls(&self) -> Vec<TrimCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transcoder for RecordingTranscoder {
    async fn trim(
        &self,
        input: &Path,
        start: f64,
        duration: f64,
        output: &Path,
    ) -> Result<(), TranscodeError> {
        self.calls.lock().unwrap().push(TrimCall {
            input: input.to_path_buf(),
            start,
            duration,
            output: output.to_path_buf(),
        });

        if self.fail {
            return Err(TranscodeError::Failed {
                code: Some(1),
                stderr: "simulated transcode failure".to_string(),
            });
        }

        std::fs::copy(input, output).map_err(|e| TranscodeError::Spawn {
            binary: "recording".to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Config rooted inside a fresh tempdir (which must be kept alive)
pub(crate) fn test_config() -> (Config, tempfile::TempDir) {
    let temp_dir = tempdir().unwrap();
    let mut config = Config::default();
    config.storage.data_dir = temp_dir.path().join("data");
    config.storage.max_concurrent_items = 3;
    (config, temp_dir)
}

/// Acquirer with a recording transcoder, rooted inside a fresh tempdir
pub(crate) async fn create_test_acquirer() -> (MediaAcquirer, Arc<RecordingTranscoder>, tempfile::TempDir)
{
    let (config, temp_dir) = test_config();
    create_test_acquirer_with(config, temp_dir).await
}

/// Acquirer from an existing config/tempdir pair (for tests that tweak config)
pub(crate) async fn create_test_acquirer_with(
    config: Config,
    temp_dir: tempfile::TempDir,
) -> (MediaAcquirer, Arc<RecordingTranscoder>, tempfile::TempDir) {
    let transcoder = RecordingTranscoder::new();
    let acquirer = MediaAcquirer::with_transcoder(config, transcoder.clone())
        .await
        .unwrap();
    (acquirer, transcoder, temp_dir)
}

/// Video item with a full duration and no explicit trim bounds
pub(crate) fn video_item(id: &str, url: &str, duration: f64) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        kind: Some(crate::types::MediaKind::Video),
        source_url: url.to_string(),
        original_url: None,
        provider: Provider::Pexels,
        duration_seconds: Some(duration),
        trim_start: None,
        trim_end: None,
    }
}

/// Image item (no duration or trim fields)
pub(crate) fn image_item(id: &str, url: &str) -> MediaItem {
    MediaItem {
        id: id.to_string(),
        kind: Some(crate::types::MediaKind::Image),
        source_url: url.to_string(),
        original_url: None,
        provider: Provider::Wikimedia,
        duration_seconds: None,
        trim_start: None,
        trim_end: None,
    }
}
