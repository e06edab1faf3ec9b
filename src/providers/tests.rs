use crate::config::Config;
use crate::providers::SearchAggregator;
use crate::types::{MediaKind, Provider};
use std::sync::Arc;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn aggregator_for(server: &MockServer, pexels_key: Option<&str>, coverr_key: Option<&str>) -> SearchAggregator {
    let mut config = Config::default();
    config.providers.pexels.api_key = pexels_key.map(str::to_string);
    config.providers.pexels.video_api_base = format!("{}/pexels/videos", server.uri());
    config.providers.pexels.image_api_base = format!("{}/pexels/v1", server.uri());
    config.providers.coverr.api_key = coverr_key.map(str::to_string);
    config.providers.coverr.api_base = server.uri();
    config.providers.wikimedia.api_base = format!("{}/w/api.php", server.uri());
    SearchAggregator::new(Arc::new(config)).unwrap()
}

fn pexels_video_body() -> serde_json::Value {
    serde_json::json!({
        "videos": [{
            "id": 1001,
            "image": "https://images.example/1001.jpg",
            "duration": 14.0,
            "video_files": [
                { "link": "https://videos.example/1001_hd.mp4" },
                { "link": "https://videos.example/1001_sd.mp4" }
            ]
        }]
    })
}

fn coverr_body() -> serde_json::Value {
    serde_json::json!({
        "hits": [
            {
                "id": "abc123",
                "urls": { "mp4_download": "https://cdn.coverr.example/abc123.mp4" },
                "duration": 9.5,
                "poster": "https://cdn.coverr.example/abc123.jpg",
                "title": "Waves"
            },
            {
                "objectID": "fallback456",
                "urls": { "mp4_download": "https://cdn.coverr.example/fallback456.mp4" }
            },
            {
                "id": "no-download",
                "urls": {}
            }
        ]
    })
}

#[tokio::test]
async fn video_search_merges_pexels_before_coverr() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pexels/videos/search"))
        .and(query_param("query", "ocean"))
        .and(header("authorization", "pexels-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pexels_video_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("urls", "true"))
        .and(header("authorization", "Bearer coverr-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coverr_body()))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server, Some("pexels-key"), Some("coverr-key")).await;
    let records = aggregator.search_videos("ocean").await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].provider, Provider::Pexels);
    assert_eq!(records[0].id, "1001");
    // First file variant wins
    assert_eq!(records[0].url, "https://videos.example/1001_hd.mp4");
    assert_eq!(records[0].duration, Some(14.0));
    assert_eq!(records[0].kind, MediaKind::Video);

    assert_eq!(records[1].provider, Provider::Coverr);
    assert_eq!(records[1].id, "abc123");
    assert_eq!(records[1].thumbnail.as_deref(), Some("https://cdn.coverr.example/abc123.jpg"));
    assert_eq!(records[1].title.as_deref(), Some("Waves"));

    // objectID stands in for a missing id; the hit with no download URL is dropped
    assert_eq!(records[2].id, "fallback456");
}

#[tokio::test]
async fn missing_pexels_key_degrades_to_coverr_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(coverr_body()))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server, None, Some("coverr-key")).await;
    let records = aggregator.search_videos("ocean").await;

    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.provider == Provider::Coverr));
}

#[tokio::test]
async fn failing_provider_degrades_to_empty_contribution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pexels/videos/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pexels_video_body()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server, Some("pexels-key"), Some("coverr-key")).await;
    let records = aggregator.search_videos("ocean").await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].provider, Provider::Pexels);
}

#[tokio::test]
async fn image_search_puts_wikimedia_first_and_prefixes_ids() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .and(query_param("gsrsearch", "cats"))
        .and(query_param("gsrnamespace", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "query": {
                "pages": {
                    "555": {
                        "pageid": 555,
                        "imageinfo": [{
                            "url": "https://upload.example/cat_full.jpg",
                            "thumburl": "https://upload.example/cat_300.jpg"
                        }]
                    }
                }
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/pexels/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "photos": [{
                "id": 42,
                "src": {
                    "medium": "https://images.pexels.example/42_medium.jpg",
                    "original": "https://images.pexels.example/42.jpg"
                }
            }]
        })))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server, Some("pexels-key"), None).await;
    let records = aggregator.search_images("cats").await;

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "wikimedia_555");
    assert_eq!(records[0].url, "https://upload.example/cat_300.jpg");
    assert_eq!(
        records[0].original_url.as_deref(),
        Some("https://upload.example/cat_full.jpg")
    );
    assert_eq!(records[0].kind, MediaKind::Image);

    assert_eq!(records[1].id, "pexels_42");
    assert_eq!(records[1].url, "https://images.pexels.example/42_medium.jpg");
    assert_eq!(
        records[1].original_url.as_deref(),
        Some("https://images.pexels.example/42.jpg")
    );
}

#[tokio::test]
async fn wikimedia_no_matches_yields_empty_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "batchcomplete": ""
        })))
        .mount(&server)
        .await;

    let aggregator = aggregator_for(&server, None, None).await;
    let records = aggregator.search_images("zxqvw").await;

    assert!(records.is_empty());
}

#[tokio::test]
async fn merged_results_are_capped_at_max_results() {
    let server = MockServer::start().await;
    let videos: Vec<serde_json::Value> = (0..50)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "duration": 5.0,
                "video_files": [{ "link": format!("https://videos.example/{i}.mp4") }]
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/pexels/videos/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "videos": videos })),
        )
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.providers.pexels.api_key = Some("pexels-key".to_string());
    config.providers.pexels.video_api_base = format!("{}/pexels/videos", server.uri());
    config.providers.coverr.api_base = server.uri();
    config.providers.max_results = 10;
    let aggregator = SearchAggregator::new(Arc::new(config)).unwrap();

    let records = aggregator.search_videos("ocean").await;
    assert_eq!(records.len(), 10);
}
