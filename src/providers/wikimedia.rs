//! Wikimedia Commons image search adapter.
//!
//! Uses the MediaWiki search generator restricted to the File namespace and
//! asks for image info with a thumbnail rendition. No credential is required.
//! Result ids are prefixed with `wikimedia_` ahead of the page id.

use super::ProviderError;
use crate::config::WikimediaConfig;
use crate::types::{MediaKind, MediaRecord, Provider};
use serde::Deserialize;
use std::collections::HashMap;

/// MediaWiki namespace number for File pages
const FILE_NAMESPACE: &str = "6";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<QuerySection>,
}

#[derive(Debug, Deserialize)]
struct QuerySection {
    pages: Option<HashMap<String, Page>>,
}

#[derive(Debug, Deserialize)]
struct Page {
    pageid: u64,
    imageinfo: Option<Vec<ImageInfo>>,
}

#[derive(Debug, Deserialize)]
struct ImageInfo {
    url: Option<String>,
    thumburl: Option<String>,
}

pub(crate) async fn search_images(
    client: &reqwest::Client,
    config: &WikimediaConfig,
    query: &str,
) -> Result<Vec<MediaRecord>, ProviderError> {
    let limit = config.result_limit.to_string();
    let width = config.thumb_width.to_string();
    let response: SearchResponse = client
        .get(&config.api_base)
        .query(&[
            ("action", "query"),
            ("format", "json"),
            ("prop", "imageinfo"),
            ("generator", "search"),
            ("gsrnamespace", FILE_NAMESPACE),
            ("gsrlimit", limit.as_str()),
            ("gsrsearch", query),
            ("iiprop", "url|thumbnail"),
            ("iiurlwidth", width.as_str()),
            ("origin", "*"),
        ])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    // A search with no matches omits the pages map entirely
    let Some(pages) = response.query.and_then(|q| q.pages) else {
        return Ok(Vec::new());
    };

    let records = pages
        .into_values()
        .filter_map(|page| {
            let info = page.imageinfo?.into_iter().next()?;
            let original = info.url;
            let url = info.thumburl.clone().or_else(|| original.clone())?;
            Some(MediaRecord {
                id: format!("wikimedia_{}", page.pageid),
                kind: MediaKind::Image,
                url,
                original_url: original,
                thumbnail: info.thumburl,
                duration: None,
                provider: Provider::Wikimedia,
                title: None,
                description: None,
            })
        })
        .collect();

    Ok(records)
}
