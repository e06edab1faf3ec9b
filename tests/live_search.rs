//! Live provider searches against real endpoints.
//!
//! Opt-in: `cargo test --features live-tests --test live_search`.
//! Only Wikimedia Commons is exercised since it needs no credential.

#![cfg(feature = "live-tests")]

use std::sync::Arc;
use stock_dl::{Config, MediaKind, Provider, SearchAggregator};

#[tokio::test]
async fn wikimedia_live_image_search_returns_records() {
    let aggregator = SearchAggregator::new(Arc::new(Config::default())).unwrap();

    let records = aggregator.search_images("sunflower").await;

    assert!(
        !records.is_empty(),
        "live Wikimedia search should return at least one record"
    );
    let record = &records[0];
    assert_eq!(record.provider, Provider::Wikimedia);
    assert_eq!(record.kind, MediaKind::Image);
    assert!(record.id.starts_with("wikimedia_"));
    assert!(record.url.starts_with("https://"));
}
