use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_videos_without_query_is_400() {
    let (app, _acquirer, _temp_dir) = create_test_app(Config::default()).await;

    let request = Request::builder()
        .uri("/search_videos")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn search_images_with_blank_query_is_400() {
    let (app, _acquirer, _temp_dir) = create_test_app(Config::default()).await;

    let request = Request::builder()
        .uri("/search_images?query=%20%20")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_videos_returns_merged_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "videos": [{
                "id": 7,
                "image": "https://images.example/7.jpg",
                "duration": 11.0,
                "video_files": [{ "link": "https://videos.example/7.mp4" }]
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "hits": [] })))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.providers.pexels.api_key = Some("pexels-key".to_string());
    config.providers.pexels.video_api_base = format!("{}/videos", server.uri());
    config.providers.coverr.api_key = Some("coverr-key".to_string());
    config.providers.coverr.api_base = server.uri();
    let (app, _acquirer, _temp_dir) = create_test_app(config).await;

    let request = Request::builder()
        .uri("/search_videos?query=ocean")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], "7");
    assert_eq!(records[0]["source"], "Pexels");
    assert_eq!(records[0]["kind"], "video");
    assert_eq!(records[0]["duration"], 11.0);
}

#[tokio::test]
async fn search_images_with_no_providers_returns_empty_list() {
    // No Pexels key; Wikimedia pointed at a failing endpoint. Both providers
    // degrade and the endpoint still answers 200 with an empty list.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/w/api.php"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.providers.wikimedia.api_base = format!("{}/w/api.php", server.uri());
    let (app, _acquirer, _temp_dir) = create_test_app(config).await;

    let request = Request::builder()
        .uri("/search_images?query=cats")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}
