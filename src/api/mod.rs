//! REST API server module
//!
//! Exposes the provider search and batch acquisition operations over HTTP,
//! with an OpenAPI specification and optional Swagger UI.

use crate::config::Config;
use crate::error::Result;
use crate::pipeline::MediaAcquirer;
use crate::providers::SearchAggregator;
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Search
/// - `GET /search_videos?query=...` - Merged video search (Pexels + Coverr)
/// - `GET /search_images?query=...` - Merged image search (Wikimedia + Pexels)
///
/// ## Acquisition
/// - `POST /download` - Acquire a batch of selected items into a namespace
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
/// - `GET /swagger-ui` - Interactive Swagger UI documentation (if enabled)
/// - `POST /shutdown` - Graceful shutdown
pub fn create_router(
    acquirer: Arc<MediaAcquirer>,
    search: Arc<SearchAggregator>,
    config: Arc<Config>,
) -> Router {
    let state = AppState::new(acquirer, search, config.clone());

    let router = Router::new()
        // Search
        .route("/search_videos", get(routes::search_videos))
        .route("/search_images", get(routes::search_images))
        // Acquisition
        .route("/download", post(routes::download_batch))
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .route("/shutdown", post(routes::shutdown));

    // Merge Swagger UI routes if enabled in config (before applying state)
    let router = if config.server.api.swagger_ui {
        router.merge(SwaggerUi::new("/swagger-ui").url("/docs/openapi.json", ApiDoc::openapi()))
    } else {
        router
    };

    let router = router.with_state(state);

    // Apply CORS middleware if enabled in config
    if config.server.api.cors_enabled {
        let cors = build_cors_layer(&config.server.api.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// Supports "*" for any origin; otherwise allows exactly the listed origins
/// with all methods and headers.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Binds a TCP listener, serves the router, and shuts down gracefully when
/// the acquirer's shutdown token fires.
///
/// # Example
///
/// ```no_run
/// use stock_dl::{Config, MediaAcquirer};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let acquirer = Arc::new(MediaAcquirer::new((*config).clone()).await?);
///
/// // Start API server (blocks until shutdown)
/// stock_dl::api::start_api_server(acquirer, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server(acquirer: Arc<MediaAcquirer>, config: Arc<Config>) -> Result<()> {
    let bind_address = config.server.api.bind_address;

    tracing::info!(
        address = %bind_address,
        "Starting API server"
    );

    let search = Arc::new(SearchAggregator::new(config.clone())?);
    let app = create_router(acquirer.clone(), search, config);

    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %bind_address,
        "API server listening"
    );

    let shutdown = acquirer.shutdown_token();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
