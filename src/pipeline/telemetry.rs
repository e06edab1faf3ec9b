//! Best-effort provider usage reporting.
//!
//! Some providers meter downloads via an API call. Telemetry is advisory:
//! failures and timeouts are logged and never affect the item's outcome.

use super::MediaAcquirer;
use crate::types::MediaItem;

impl MediaAcquirer {
    /// Report a completed download to the item's provider, if it is metered.
    ///
    /// Skipped silently when the provider is not metered or no credential is
    /// configured. Bounded by the configured telemetry timeout so a stalled
    /// provider endpoint cannot hold an otherwise finished item open.
    pub(crate) async fn report_download(&self, item: &MediaItem) {
        if !item.provider.metered() {
            return;
        }

        let Some(token) = self.config.providers.coverr.api_key.as_deref() else {
            tracing::debug!(item_id = %item.id, "no provider credential, skipping download report");
            return;
        };

        let url = format!(
            "{}/videos/{}/metrics/download",
            self.config.providers.coverr.api_base.trim_end_matches('/'),
            item.id
        );

        let request = self.http_client.post(&url).bearer_auth(token).send();
        match tokio::time::timeout(self.config.telemetry.timeout, request).await {
            Ok(Ok(response)) if response.status().is_success() => {
                tracing::debug!(item_id = %item.id, "download reported");
            }
            Ok(Ok(response)) => {
                tracing::warn!(
                    item_id = %item.id,
                    status = response.status().as_u16(),
                    "download report rejected"
                );
            }
            Ok(Err(e)) => {
                tracing::warn!(item_id = %item.id, error = %e, "download report failed");
            }
            Err(_) => {
                tracing::warn!(
                    item_id = %item.id,
                    timeout = ?self.config.telemetry.timeout,
                    "download report timed out"
                );
            }
        }
    }
}
