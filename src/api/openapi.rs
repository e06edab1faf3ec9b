//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the stock-dl REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the stock-dl REST API
///
/// The spec can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "stock-dl REST API",
        version = "0.2.0",
        description = "Stock media search and acquisition: merged provider search plus batch download with optional video trimming",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:7655", description = "Local development server")
    ),
    paths(
        // Search
        crate::api::routes::search_videos,
        crate::api::routes::search_images,

        // Acquisition
        crate::api::routes::download_batch,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
        crate::api::routes::shutdown,
    ),
    components(schemas(
        // Core types from types.rs
        crate::types::Provider,
        crate::types::MediaKind,
        crate::types::MediaRecord,
        crate::types::MediaItem,
        crate::types::Batch,
        crate::types::ItemStatus,
        crate::types::ItemOutcome,
        crate::types::ItemFailure,
        crate::types::BatchSummary,

        // Request/response types from routes
        crate::api::routes::SearchQuery,
        crate::api::routes::DownloadResponse,

        // Error envelope
        crate::error::ApiError,
        crate::error::ErrorDetail,

        // Config types from config.rs
        crate::config::Config,
        crate::config::StorageConfig,
        crate::config::ProvidersConfig,
        crate::config::PexelsConfig,
        crate::config::CoverrConfig,
        crate::config::WikimediaConfig,
        crate::config::TranscodeConfig,
        crate::config::TelemetryConfig,
        crate::config::ServerConfig,
        crate::config::ApiConfig,
    )),
    tags(
        (name = "search", description = "Merged provider search"),
        (name = "acquisition", description = "Batch download and trimming"),
        (name = "system", description = "Health and lifecycle"),
    )
)]
pub struct ApiDoc;
