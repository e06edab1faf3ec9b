//! Core types shared across the search and acquisition pipeline.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Media provider origin for a search result or selected item.
///
/// The provider discriminant drives two per-item policies:
/// - whether download requests carry a bearer credential
///   ([`Provider::requires_bearer_auth`])
/// - whether a usage-telemetry call is owed after a successful download
///   ([`Provider::metered`])
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Provider {
    /// Pexels stock video/photo API
    Pexels,
    /// Coverr stock video API (authenticated downloads, metered usage)
    Coverr,
    /// Wikimedia Commons media search
    #[serde(rename = "Wikimedia Commons")]
    Wikimedia,
}

impl Provider {
    /// Whether downloads from this provider must carry a bearer credential
    pub fn requires_bearer_auth(&self) -> bool {
        matches!(self, Provider::Coverr)
    }

    /// Whether this provider requires a usage-telemetry call per download
    pub fn metered(&self) -> bool {
        matches!(self, Provider::Coverr)
    }

    /// Provider name as it appears in normalized records
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Pexels => "Pexels",
            Provider::Coverr => "Coverr",
            Provider::Wikimedia => "Wikimedia Commons",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of media asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Video asset, persisted as mp4 (optionally trimmed)
    Video,
    /// Image asset, persisted byte-for-byte
    Image,
}

/// One selected media asset, the unit of work for the acquisition pipeline.
///
/// Field names follow the normalized wire contract (camelCase); aliases accept
/// the shorter names used by provider search results (`url`, `source`,
/// `duration`, `start`, `end`) so a selected search record can be submitted
/// back unchanged.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Unique id within the provider; used as the output filename stem
    pub id: String,

    /// Asset kind; may be omitted when the batch carries a batch-level kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,

    /// Remote location of the raw bytes
    #[serde(alias = "url")]
    pub source_url: String,

    /// Highest-fidelity variant, preferred over `source_url` for images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,

    /// Origin provider (drives auth-header and telemetry policy)
    #[serde(alias = "source")]
    pub provider: Provider,

    /// Full duration in seconds (video only; upper bound for the trim window)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "duration")]
    pub duration_seconds: Option<f64>,

    /// Trim window start in seconds (video only; defaults to 0)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "start")]
    pub trim_start: Option<f64>,

    /// Trim window end in seconds (video only; defaults to the full duration)
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "end")]
    pub trim_end: Option<f64>,
}

/// One acquisition request: a destination namespace plus the selected items.
///
/// Accepts both the flat shape `{ namespace, items }` and the
/// type-partitioned variant `{ query, type, items }` sent by older clients.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Batch {
    /// User-chosen folder name; sanitized before any filesystem use
    #[serde(alias = "query")]
    pub namespace: String,

    /// Batch-level kind applied to items that omit their own `kind`
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "type")]
    pub kind: Option<MediaKind>,

    /// Selected items, in client order (must be non-empty)
    pub items: Vec<MediaItem>,
}

impl Batch {
    /// Resolve the effective kind for an item (item-level wins over batch-level)
    pub fn item_kind(&self, item: &MediaItem) -> Option<MediaKind> {
        item.kind.or(self.kind)
    }
}

/// Per-item acquisition status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// Item persisted at its destination path
    Ok,
    /// Item was attempted but not persisted
    Failed,
}

/// Result of acquiring a single item
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemOutcome {
    /// Id of the item this outcome belongs to
    pub item_id: String,
    /// Whether the item was persisted
    pub status: ItemStatus,
    /// Failure detail (present iff `status == failed`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ItemOutcome {
    /// Successful outcome for the given item id
    pub fn ok(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            status: ItemStatus::Ok,
            error: None,
        }
    }

    /// Failed outcome with an error detail
    pub fn failed(item_id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            status: ItemStatus::Failed,
            error: Some(error.into()),
        }
    }

    /// Whether the item was persisted
    pub fn is_ok(&self) -> bool {
        self.status == ItemStatus::Ok
    }
}

/// One entry in a batch summary's failure list
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ItemFailure {
    /// Id of the failed item
    pub id: String,
    /// Why the item failed
    pub error: String,
}

/// Aggregate result of one batch
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Number of items persisted successfully
    pub success_count: usize,
    /// Items that failed, with their error details
    pub failures: Vec<ItemFailure>,
}

impl BatchSummary {
    /// Build a summary from collected per-item outcomes
    pub fn from_outcomes(outcomes: Vec<ItemOutcome>) -> Self {
        let mut success_count = 0;
        let mut failures = Vec::new();
        for outcome in outcomes {
            if outcome.is_ok() {
                success_count += 1;
            } else {
                failures.push(ItemFailure {
                    id: outcome.item_id,
                    error: outcome.error.unwrap_or_else(|| "unknown error".to_string()),
                });
            }
        }
        Self {
            success_count,
            failures,
        }
    }

    /// Whether at least one item was persisted.
    ///
    /// A batch is considered failed only when every item failed; anything
    /// else is a (partial) success with failures enumerated alongside.
    pub fn succeeded(&self) -> bool {
        self.success_count > 0
    }

    /// Whether every item was persisted
    pub fn is_full_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Normalized search result record produced by the provider adapters.
///
/// Every provider's response is mapped into this one shape; consumers never
/// see provider-specific schemas.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Provider-unique id (prefixed for image providers, e.g. `pexels_123`)
    pub id: String,
    /// Asset kind
    pub kind: MediaKind,
    /// Download/display URL for the asset
    pub url: String,
    /// Highest-fidelity variant when the provider exposes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    /// Thumbnail/preview URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Duration in seconds (video records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Origin provider
    #[serde(rename = "source")]
    pub provider: Provider,
    /// Asset title, when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Asset description, when the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_item_accepts_search_record_aliases() {
        // A selected search record can be posted back without renaming fields
        let item: MediaItem = serde_json::from_value(serde_json::json!({
            "id": "v1",
            "url": "https://example.com/v1.mp4",
            "source": "Coverr",
            "duration": 12.0,
            "start": 2.0,
            "end": 6.0,
        }))
        .unwrap();

        assert_eq!(item.source_url, "https://example.com/v1.mp4");
        assert_eq!(item.provider, Provider::Coverr);
        assert_eq!(item.duration_seconds, Some(12.0));
        assert_eq!(item.trim_start, Some(2.0));
        assert_eq!(item.trim_end, Some(6.0));
        assert!(item.kind.is_none());
    }

    #[test]
    fn media_item_accepts_camel_case_contract() {
        let item: MediaItem = serde_json::from_value(serde_json::json!({
            "id": "img9",
            "kind": "image",
            "sourceUrl": "https://example.com/img9.jpg",
            "originalUrl": "https://example.com/img9_full.jpg",
            "provider": "Pexels",
        }))
        .unwrap();

        assert_eq!(item.kind, Some(MediaKind::Image));
        assert_eq!(
            item.original_url.as_deref(),
            Some("https://example.com/img9_full.jpg")
        );
    }

    #[test]
    fn batch_accepts_type_partitioned_variant() {
        let batch: Batch = serde_json::from_value(serde_json::json!({
            "query": "cats",
            "type": "video",
            "items": [{
                "id": "v1",
                "url": "https://example.com/v1.mp4",
                "source": "Pexels",
            }],
        }))
        .unwrap();

        assert_eq!(batch.namespace, "cats");
        assert_eq!(batch.item_kind(&batch.items[0]), Some(MediaKind::Video));
    }

    #[test]
    fn item_kind_prefers_item_level() {
        let batch: Batch = serde_json::from_value(serde_json::json!({
            "namespace": "mixed",
            "type": "video",
            "items": [{
                "id": "i1",
                "kind": "image",
                "sourceUrl": "https://example.com/i1.png",
                "provider": "Wikimedia Commons",
            }],
        }))
        .unwrap();

        assert_eq!(batch.item_kind(&batch.items[0]), Some(MediaKind::Image));
    }

    #[test]
    fn wikimedia_provider_roundtrips_display_name() {
        let json = serde_json::to_string(&Provider::Wikimedia).unwrap();
        assert_eq!(json, "\"Wikimedia Commons\"");
        let back: Provider = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Provider::Wikimedia);
    }

    #[test]
    fn provider_policies() {
        assert!(Provider::Coverr.requires_bearer_auth());
        assert!(Provider::Coverr.metered());
        assert!(!Provider::Pexels.requires_bearer_auth());
        assert!(!Provider::Pexels.metered());
        assert!(!Provider::Wikimedia.metered());
    }

    #[test]
    fn summary_aggregates_outcomes() {
        let summary = BatchSummary::from_outcomes(vec![
            ItemOutcome::ok("a"),
            ItemOutcome::failed("b", "HTTP 404"),
            ItemOutcome::ok("c"),
        ]);

        assert_eq!(summary.success_count, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].id, "b");
        assert!(summary.succeeded());
        assert!(!summary.is_full_success());
    }

    #[test]
    fn summary_all_failed_is_not_success() {
        let summary = BatchSummary::from_outcomes(vec![ItemOutcome::failed("a", "boom")]);
        assert!(!summary.succeeded());
    }
}
