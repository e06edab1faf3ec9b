//! Batch orchestration: validation, bounded fan-out, outcome aggregation.

use super::MediaAcquirer;
use crate::error::{AcquireError, Error, Result};
use crate::types::{Batch, BatchSummary, ItemOutcome, MediaKind};
use crate::utils::sanitize_namespace;
use futures::StreamExt;
use futures::stream;

impl MediaAcquirer {
    /// Run one acquisition batch to completion.
    ///
    /// Structural problems (no items, unusable namespace, items without a
    /// resolvable kind) and a failure to create the namespace directory are
    /// batch-fatal and return `Err` before any item is attempted. Everything
    /// after that point is isolated per item: a failing download, trim, or
    /// write is recorded in that item's outcome and the remaining items still
    /// run. The batch as a whole is considered failed only when every item
    /// failed.
    pub async fn run_batch(&self, batch: &Batch) -> Result<BatchSummary> {
        // Validation happens before any filesystem or network I/O
        if batch.items.is_empty() {
            return Err(Error::validation("batch contains no items"));
        }
        let namespace = sanitize_namespace(&batch.namespace)?;

        let mut kinds: Vec<MediaKind> = Vec::with_capacity(batch.items.len());
        for item in &batch.items {
            match batch.item_kind(item) {
                Some(kind) => kinds.push(kind),
                None => {
                    return Err(Error::validation(format!(
                        "item {} has no kind and the batch specifies none",
                        item.id
                    )));
                }
            }
        }

        // Created once before fan-out; items write distinct filenames so the
        // directory is safe for concurrent writers. Failure here means no
        // item can be persisted, so it is batch-fatal.
        let namespace_dir = self.config.storage.data_dir.join(&namespace);
        tokio::fs::create_dir_all(&namespace_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "Failed to create namespace directory '{}': {}",
                        namespace_dir.display(),
                        e
                    ),
                ))
            })?;

        tracing::info!(
            namespace = %namespace,
            items = batch.items.len(),
            "Starting acquisition batch"
        );

        let concurrency = self.config.storage.max_concurrent_items.max(1);
        let dir = &namespace_dir;
        let item_futures: Vec<_> = batch
            .items
            .iter()
            .zip(kinds)
            .map(|(item, kind)| async move {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        ItemOutcome::failed(&item.id, AcquireError::Cancelled.to_string())
                    }
                    outcome = self.acquire(dir, item, kind) => outcome,
                }
            })
            .collect();
        let outcomes: Vec<ItemOutcome> = stream::iter(item_futures)
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let summary = BatchSummary::from_outcomes(outcomes);
        tracing::info!(
            namespace = %namespace,
            succeeded = summary.success_count,
            failed = summary.failures.len(),
            "Acquisition batch finished"
        );

        Ok(summary)
    }
}
