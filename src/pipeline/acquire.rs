//! Per-item acquisition: download → trim (video) → persist.
//!
//! Each step writes only to hidden temp paths inside the namespace directory;
//! the final destination is populated by a rename after the producing step
//! succeeds, so a crash or failure never leaves a half-written artifact at a
//! destination path. Temp files are removed on every exit path by the
//! [`TempArtifact`] guard, including cancellation.

use super::MediaAcquirer;
use crate::error::AcquireError;
use crate::types::{ItemOutcome, MediaItem, MediaKind, Provider};
use crate::utils::extension_from_url;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Validated trim window, expressed as ffmpeg expects it
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TrimWindow {
    /// Seek offset into the source, in seconds
    pub(crate) start: f64,
    /// Length of the output clip, in seconds
    pub(crate) duration: f64,
}

/// Resolve and validate an item's trim window.
///
/// Bounds default to `[0, duration_seconds]` and are clamped into
/// `[0, duration_seconds]` when the full duration is known. A window that is
/// empty or inverted after clamping is rejected; the transcoder is never
/// invoked with a non-positive duration.
pub(crate) fn resolve_trim_window(item: &MediaItem) -> Result<TrimWindow, AcquireError> {
    let full_duration = item.duration_seconds;

    let mut start = item.trim_start.unwrap_or(0.0).max(0.0);
    let mut end = match (item.trim_end, full_duration) {
        (Some(end), Some(duration)) => end.min(duration),
        (Some(end), None) => end,
        (None, Some(duration)) => duration,
        (None, None) => {
            return Err(AcquireError::InvalidTrimRange {
                id: item.id.clone(),
                start,
                end: 0.0,
                duration: 0.0,
            });
        }
    };
    end = end.max(0.0);
    if let Some(duration) = full_duration {
        start = start.min(duration);
    }

    // `!(end > start)` also rejects NaN bounds
    if !(end > start) {
        return Err(AcquireError::InvalidTrimRange {
            id: item.id.clone(),
            start: item.trim_start.unwrap_or(0.0),
            end: item.trim_end.unwrap_or(0.0),
            duration: full_duration.unwrap_or(0.0),
        });
    }

    Ok(TrimWindow {
        start,
        duration: end - start,
    })
}

/// Guard for a temporary file: removed on drop unless persisted.
///
/// [`persist_to`](TempArtifact::persist_to) renames the temp file onto its
/// final destination, which both finalizes the artifact atomically and
/// disarms the guard.
pub(crate) struct TempArtifact {
    path: PathBuf,
    keep: bool,
}

impl TempArtifact {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path, keep: false }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the temp file onto `dest`, overwriting any previous artifact
    pub(crate) fn persist_to(mut self, dest: &Path) -> Result<(), AcquireError> {
        std::fs::rename(&self.path, dest).map_err(|e| AcquireError::Filesystem {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.keep = true;
        Ok(())
    }
}

impl Drop for TempArtifact {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %self.path.display(), error = %e, "temp file cleanup failed");
            }
        }
    }
}

impl MediaAcquirer {
    /// Acquire one item into the namespace directory.
    ///
    /// Never panics and never propagates: every failure is captured into the
    /// returned outcome so sibling items in the batch are unaffected.
    pub(crate) async fn acquire(
        &self,
        namespace_dir: &Path,
        item: &MediaItem,
        kind: MediaKind,
    ) -> ItemOutcome {
        let result = match kind {
            MediaKind::Video => self.acquire_video(namespace_dir, item).await,
            MediaKind::Image => self.acquire_image(namespace_dir, item).await,
        };

        match result {
            Ok(dest) => {
                tracing::debug!(item_id = %item.id, path = %dest.display(), "item acquired");
                ItemOutcome::ok(&item.id)
            }
            Err(e) => {
                tracing::warn!(
                    item_id = %item.id,
                    provider = %item.provider,
                    error = %e,
                    "item acquisition failed"
                );
                ItemOutcome::failed(&item.id, e.to_string())
            }
        }
    }

    /// Video: download raw bytes, trim to the validated window, finalize.
    async fn acquire_video(
        &self,
        namespace_dir: &Path,
        item: &MediaItem,
    ) -> Result<PathBuf, AcquireError> {
        // Validate before any network or subprocess work
        let window = resolve_trim_window(item)?;

        let dest = namespace_dir.join(format!("{}.mp4", item.id));
        let raw = TempArtifact::new(namespace_dir.join(format!(".{}.download.mp4", item.id)));
        self.download_to(&item.source_url, item.provider, raw.path())
            .await?;

        let trimmed = TempArtifact::new(namespace_dir.join(format!(".{}.trim.mp4", item.id)));
        self.transcoder
            .trim(raw.path(), window.start, window.duration, trimmed.path())
            .await
            .map_err(AcquireError::Transcode)?;

        // The raw download is no longer needed regardless of what follows
        drop(raw);

        trimmed.persist_to(&dest)?;
        self.report_download(item).await;
        Ok(dest)
    }

    /// Image: the downloaded stream is the final artifact.
    async fn acquire_image(
        &self,
        namespace_dir: &Path,
        item: &MediaItem,
    ) -> Result<PathBuf, AcquireError> {
        // Prefer the highest-fidelity variant when the provider exposes one
        let url = item.original_url.as_deref().unwrap_or(&item.source_url);

        let filename = match extension_from_url(url) {
            Some(ext) => format!("{}.{}", item.id, ext),
            None => item.id.clone(),
        };
        let dest = namespace_dir.join(filename);

        let tmp = TempArtifact::new(namespace_dir.join(format!(".{}.download", item.id)));
        self.download_to(url, item.provider, tmp.path()).await?;
        tmp.persist_to(&dest)?;

        self.report_download(item).await;
        Ok(dest)
    }

    /// Stream an HTTP GET body to disk without buffering it in memory.
    async fn download_to(
        &self,
        url: &str,
        provider: Provider,
        dest: &Path,
    ) -> Result<(), AcquireError> {
        let mut request = self.http_client.get(url);
        if let Some(token) = self.config.providers.bearer_for(provider) {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| AcquireError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AcquireError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| AcquireError::Filesystem {
                path: dest.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AcquireError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AcquireError::Filesystem {
                    path: dest.to_path_buf(),
                    reason: e.to_string(),
                })?;
        }

        file.flush().await.map_err(|e| AcquireError::Filesystem {
            path: dest.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}
