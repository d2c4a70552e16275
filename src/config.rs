use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable prefix for every configuration key
pub const ENV_PREFIX: &str = "MOVIE_EXPLORER_";

/// Where the favorites list is persisted
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`
    File,
    /// Process memory only, nothing survives a restart
    Memory,
    /// Redis server at `redis_url`
    Redis,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Catalog REST API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for catalog calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Items per page served by the catalog
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Quiet interval before a filter edit is forwarded to the fetcher
    #[serde(default = "default_filter_debounce_ms")]
    pub filter_debounce_ms: u64,

    /// Favorites persistence backend
    #[serde(default = "default_storage_backend")]
    pub storage_backend: StorageBackend,

    /// Directory used by the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    10
}

fn default_filter_debounce_ms() -> u64 {
    700
}

fn default_storage_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".movie-explorer")
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            page_size: default_page_size(),
            filter_debounce_ms: default_filter_debounce_ms(),
            storage_backend: default_storage_backend(),
            data_dir: default_data_dir(),
            redis_url: default_redis_url(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.page_size == 0 {
            anyhow::bail!("Failed to load config: page_size must be at least 1");
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn filter_debounce(&self) -> Duration {
        Duration::from_millis(self.filter_debounce_ms)
    }
}
