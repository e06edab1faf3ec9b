//! Application state for the API server

use crate::config::Config;
use crate::pipeline::MediaAcquirer;
use crate::providers::SearchAggregator;
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// This struct is cloned for each request (cheap Arc clones) and provides
/// access to the acquisition pipeline, the search aggregator, and the
/// configuration.
#[derive(Clone)]
pub struct AppState {
    /// The acquisition pipeline instance
    pub acquirer: Arc<MediaAcquirer>,

    /// Provider search aggregator
    pub search: Arc<SearchAggregator>,

    /// Configuration (read access)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        acquirer: Arc<MediaAcquirer>,
        search: Arc<SearchAggregator>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            acquirer,
            search,
            config,
        }
    }
}
