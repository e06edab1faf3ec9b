//! Configuration types for stock-dl
//!
//! Provider credentials are explicit configuration values passed in at
//! construction time, never ambient process-wide lookups, so tests can inject
//! fake credentials or omit them entirely.

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use utoipa::ToSchema;

/// Main configuration for [`MediaAcquirer`](crate::pipeline::MediaAcquirer)
/// and the search aggregator.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// Storage layout and concurrency settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Provider credentials and API endpoints
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// External transcoder settings
    #[serde(default)]
    pub transcode: TranscodeConfig,

    /// Usage-telemetry settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,

    /// REST API server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Storage layout and batch concurrency
///
/// Each namespace becomes one directory under `data_dir`; each acquired item
/// becomes one file named by its id inside that directory.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageConfig {
    /// Data root under which namespace directories are created (default: "./data")
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Maximum items acquired concurrently within one batch (default: 4)
    ///
    /// Bounds simultaneous outbound connections and transcoder subprocesses.
    #[serde(default = "default_max_concurrent_items")]
    pub max_concurrent_items: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_concurrent_items: default_max_concurrent_items(),
        }
    }
}

/// Provider credentials, endpoints, and result shaping
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProvidersConfig {
    /// Pexels API settings
    #[serde(default)]
    pub pexels: PexelsConfig,

    /// Coverr API settings
    #[serde(default)]
    pub coverr: CoverrConfig,

    /// Wikimedia Commons API settings
    #[serde(default)]
    pub wikimedia: WikimediaConfig,

    /// Display cap applied to merged search results (default: 60)
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Timeout for provider search requests (default: 30 seconds)
    #[serde(default = "default_search_timeout", with = "duration_serde")]
    pub search_timeout: Duration,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            pexels: PexelsConfig::default(),
            coverr: CoverrConfig::default(),
            wikimedia: WikimediaConfig::default(),
            max_results: default_max_results(),
            search_timeout: default_search_timeout(),
        }
    }
}

impl ProvidersConfig {
    /// Bearer credential to attach when downloading from the given provider,
    /// if one is required and configured
    pub fn bearer_for(&self, provider: crate::types::Provider) -> Option<&str> {
        if provider.requires_bearer_auth() {
            self.coverr.api_key.as_deref()
        } else {
            None
        }
    }
}

/// Pexels video/photo API settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PexelsConfig {
    /// API key; searches degrade to empty results when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Video search API base (default: "https://api.pexels.com/videos")
    #[serde(default = "default_pexels_video_base")]
    pub video_api_base: String,

    /// Photo search API base (default: "https://api.pexels.com/v1")
    #[serde(default = "default_pexels_image_base")]
    pub image_api_base: String,

    /// Videos requested per search (default: 45)
    #[serde(default = "default_pexels_videos_per_page")]
    pub videos_per_page: u32,

    /// Photos requested per search (default: 50)
    #[serde(default = "default_pexels_images_per_page")]
    pub images_per_page: u32,
}

impl Default for PexelsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            video_api_base: default_pexels_video_base(),
            image_api_base: default_pexels_image_base(),
            videos_per_page: default_pexels_videos_per_page(),
            images_per_page: default_pexels_images_per_page(),
        }
    }
}

/// Coverr video API settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CoverrConfig {
    /// API key; used for search, authenticated downloads, and telemetry.
    /// Searches degrade to empty results when absent.
    #[serde(default)]
    pub api_key: Option<String>,

    /// API base (default: "https://api.coverr.co")
    #[serde(default = "default_coverr_base")]
    pub api_base: String,
}

impl Default for CoverrConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: default_coverr_base(),
        }
    }
}

/// Wikimedia Commons search settings (no credential required)
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct WikimediaConfig {
    /// MediaWiki API endpoint (default: "https://commons.wikimedia.org/w/api.php")
    #[serde(default = "default_wikimedia_base")]
    pub api_base: String,

    /// Maximum results requested per search (default: 150)
    #[serde(default = "default_wikimedia_limit")]
    pub result_limit: u32,

    /// Requested thumbnail width in pixels (default: 300)
    #[serde(default = "default_wikimedia_thumb_width")]
    pub thumb_width: u32,
}

impl Default for WikimediaConfig {
    fn default() -> Self {
        Self {
            api_base: default_wikimedia_base(),
            result_limit: default_wikimedia_limit(),
            thumb_width: default_wikimedia_thumb_width(),
        }
    }
}

/// External transcoder (ffmpeg) settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TranscodeConfig {
    /// Path to ffmpeg executable (auto-detected from PATH if None)
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for ffmpeg if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            search_path: true,
        }
    }
}

/// Usage-telemetry settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TelemetryConfig {
    /// Timeout for a telemetry POST (default: 10 seconds)
    ///
    /// A telemetry call may delay its own item by at most this long; its
    /// failure never changes the item's outcome.
    #[serde(default = "default_telemetry_timeout", with = "duration_serde")]
    pub timeout: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            timeout: default_telemetry_timeout(),
        }
    }
}

/// Server configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ServerConfig {
    /// REST API settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// REST API configuration
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiConfig {
    /// Bind address for the API server (default: 127.0.0.1:7655)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Whether to enable CORS (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins ("*" for any; default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Whether to serve the Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_max_concurrent_items() -> usize {
    4
}

fn default_max_results() -> usize {
    60
}

fn default_search_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_pexels_video_base() -> String {
    "https://api.pexels.com/videos".to_string()
}

fn default_pexels_image_base() -> String {
    "https://api.pexels.com/v1".to_string()
}

fn default_pexels_videos_per_page() -> u32 {
    45
}

fn default_pexels_images_per_page() -> u32 {
    50
}

fn default_coverr_base() -> String {
    "https://api.coverr.co".to_string()
}

fn default_wikimedia_base() -> String {
    "https://commons.wikimedia.org/w/api.php".to_string()
}

fn default_wikimedia_limit() -> u32 {
    150
}

fn default_wikimedia_thumb_width() -> u32 {
    300
}

fn default_telemetry_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_bind_address() -> SocketAddr {
    #[allow(clippy::unwrap_used)] // static literal
    "127.0.0.1:7655".parse().unwrap()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
