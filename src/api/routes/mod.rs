//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`search`] — Provider search endpoints
//! - [`batches`] — Batch acquisition
//! - [`system`] — Health, OpenAPI, shutdown

use serde::{Deserialize, Serialize};

mod batches;
mod search;
mod system;

// Re-export all handlers so `routes::function_name` continues to work
pub use batches::*;
pub use search::*;
pub use system::*;

/// Query parameters for the search endpoints
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SearchQuery {
    /// Search keyword; required, rejected with 400 when missing or empty
    pub query: Option<String>,
}
