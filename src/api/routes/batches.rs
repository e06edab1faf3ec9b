//! Batch acquisition handler.

use crate::api::AppState;
use crate::error::Error;
use crate::types::{Batch, ItemFailure};
use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};

/// Response body for POST /download
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    /// Whether at least one item was acquired
    pub success: bool,
    /// Human-readable outcome summary
    pub message: String,
    /// Number of items persisted
    pub success_count: usize,
    /// Items that failed, with their error details
    pub failures: Vec<ItemFailure>,
}

/// POST /download - Acquire a batch of selected items
///
/// Items are acquired concurrently with per-item failure isolation: one bad
/// item never aborts its siblings. The response enumerates every failure.
#[utoipa::path(
    post,
    path = "/download",
    tag = "acquisition",
    request_body = Batch,
    responses(
        (status = 200, description = "Batch processed; per-item outcomes enumerated", body = DownloadResponse),
        (status = 400, description = "Structurally invalid batch"),
        (status = 500, description = "Batch-fatal failure (e.g. namespace directory not writable)")
    )
)]
pub async fn download_batch(
    State(state): State<AppState>,
    Json(batch): Json<Batch>,
) -> Result<impl IntoResponse, Error> {
    let summary = state.acquirer.run_batch(&batch).await?;

    let message = if summary.is_full_success() {
        format!("All {} items acquired.", summary.success_count)
    } else {
        let failed_ids: Vec<&str> = summary.failures.iter().map(|f| f.id.as_str()).collect();
        format!(
            "{} items acquired, {} failed: {}",
            summary.success_count,
            summary.failures.len(),
            failed_ids.join(", ")
        )
    };

    Ok(Json(DownloadResponse {
        success: summary.succeeded(),
        message,
        success_count: summary.success_count,
        failures: summary.failures,
    }))
}
