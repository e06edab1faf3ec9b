//! Pexels video and photo search adapter.
//!
//! Pexels authenticates with the raw API key in the `Authorization` header
//! (no `Bearer` prefix). Photo ids are prefixed with `pexels_` so they cannot
//! collide with other image providers inside one namespace directory; video
//! ids pass through unprefixed.

use super::ProviderError;
use crate::config::PexelsConfig;
use crate::types::{MediaKind, MediaRecord, Provider};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    videos: Vec<PexelsVideo>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: u64,
    image: Option<String>,
    duration: Option<f64>,
    video_files: Vec<VideoFile>,
}

#[derive(Debug, Deserialize)]
struct VideoFile {
    link: String,
}

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    src: PhotoSources,
}

#[derive(Debug, Deserialize)]
struct PhotoSources {
    medium: String,
    original: String,
}

pub(crate) async fn search_videos(
    client: &reqwest::Client,
    config: &PexelsConfig,
    query: &str,
) -> Result<Vec<MediaRecord>, ProviderError> {
    let api_key = config.api_key.as_deref().ok_or(ProviderError::MissingCredential)?;

    let per_page = config.videos_per_page.to_string();
    let response: VideoSearchResponse = client
        .get(format!("{}/search", config.video_api_base.trim_end_matches('/')))
        .query(&[("query", query), ("per_page", per_page.as_str())])
        .header("Authorization", api_key)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let records = response
        .videos
        .into_iter()
        .filter_map(|video| {
            // A video without any file variant is unusable
            let file = video.video_files.into_iter().next()?;
            Some(MediaRecord {
                id: video.id.to_string(),
                kind: MediaKind::Video,
                url: file.link,
                original_url: None,
                thumbnail: video.image,
                duration: video.duration,
                provider: Provider::Pexels,
                title: None,
                description: None,
            })
        })
        .collect();

    Ok(records)
}

pub(crate) async fn search_images(
    client: &reqwest::Client,
    config: &PexelsConfig,
    query: &str,
) -> Result<Vec<MediaRecord>, ProviderError> {
    let api_key = config.api_key.as_deref().ok_or(ProviderError::MissingCredential)?;

    let per_page = config.images_per_page.to_string();
    let response: PhotoSearchResponse = client
        .get(format!("{}/search", config.image_api_base.trim_end_matches('/')))
        .query(&[("query", query), ("per_page", per_page.as_str())])
        .header("Authorization", api_key)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let records = response
        .photos
        .into_iter()
        .map(|photo| MediaRecord {
            id: format!("pexels_{}", photo.id),
            kind: MediaKind::Image,
            url: photo.src.medium,
            original_url: Some(photo.src.original),
            thumbnail: None,
            duration: None,
            provider: Provider::Pexels,
            title: None,
            description: None,
        })
        .collect();

    Ok(records)
}
