//! Coverr video search adapter.
//!
//! Coverr authenticates with a bearer credential and exposes its hit list
//! under `hits`, where each hit may carry its id as `id` or `objectID` and the
//! downloadable variant under `urls.mp4_download`. Hits without a download URL
//! are dropped rather than surfaced as broken records.

use super::ProviderError;
use crate::config::CoverrConfig;
use crate::types::{MediaKind, MediaRecord, Provider};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Option<Vec<CoverrHit>>,
}

#[derive(Debug, Deserialize)]
struct CoverrHit {
    id: Option<String>,
    #[serde(rename = "objectID")]
    object_id: Option<String>,
    urls: Option<HitUrls>,
    duration: Option<f64>,
    thumbnail: Option<String>,
    poster: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HitUrls {
    mp4_download: Option<String>,
}

pub(crate) async fn search_videos(
    client: &reqwest::Client,
    config: &CoverrConfig,
    query: &str,
) -> Result<Vec<MediaRecord>, ProviderError> {
    let api_key = config.api_key.as_deref().ok_or(ProviderError::MissingCredential)?;

    let response: SearchResponse = client
        .get(format!("{}/videos", config.api_base.trim_end_matches('/')))
        .query(&[("urls", "true"), ("query", query)])
        .bearer_auth(api_key)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let hits = response
        .hits
        .ok_or_else(|| ProviderError::BadShape("missing 'hits' array".to_string()))?;

    let records = hits
        .into_iter()
        .filter_map(|hit| {
            let id = hit.id.or(hit.object_id)?;
            let url = hit.urls.and_then(|u| u.mp4_download)?;
            Some(MediaRecord {
                id,
                kind: MediaKind::Video,
                url,
                original_url: None,
                thumbnail: hit.thumbnail.or(hit.poster),
                duration: hit.duration,
                provider: Provider::Coverr,
                title: hit.title,
                description: hit.description,
            })
        })
        .collect();

    Ok(records)
}
