use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Relational snapshot source configuration
    pub database: DatabaseConfig,

    /// Search engine configuration
    pub search: SearchConfig,

    /// Index build and rotation configuration
    pub indexing: IndexingConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/default.toml".to_string());

        config::Config::builder()
            // Start with default values
            .add_source(config::File::from_str(
                include_str!("../config/default.toml"),
                config::FileFormat::Toml,
            ))
            // Override with config file if it exists
            .add_source(config::File::with_name(&config_path).required(false))
            // Override with environment variables (prefix: INDEXER_)
            .add_source(
                config::Environment::with_prefix("INDEXER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server host
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP server port
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// MySQL connection URL
    pub url: String,

    /// Maximum number of open connections
    #[serde(default = "default_pool_size")]
    pub max_connections: u32,

    /// Connection acquire timeout (seconds)
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search engine base URL
    pub url: String,

    /// Basic auth username
    #[serde(default)]
    pub username: Option<String>,

    /// Basic auth password
    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout (seconds)
    #[serde(default = "default_search_timeout")]
    pub request_timeout_secs: u64,
}

/// Settings applied to every new index generation, plus the bulk-load
/// retry budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexingConfig {
    /// Bulk write retry attempts
    #[serde(default = "default_bulk_attempts")]
    pub bulk_retry_attempts: u32,

    /// Fixed backoff between bulk retries (seconds)
    #[serde(default = "default_bulk_backoff")]
    pub bulk_retry_backoff_secs: u64,

    /// Index refresh interval (seconds)
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u32,

    /// Number of primary shards per generation
    #[serde(default = "default_shards")]
    pub number_of_shards: u32,

    /// Number of replicas per generation
    #[serde(default = "default_replicas")]
    pub number_of_replicas: u32,

    /// Nested field mapping limit
    #[serde(default = "default_nested_fields_limit")]
    pub nested_fields_limit: u32,
}

impl IndexingConfig {
    pub fn bulk_backoff(&self) -> Duration {
        Duration::from_secs(self.bulk_retry_backoff_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// Service name
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl ObservabilityConfig {
    /// Fallback env-filter directive when `RUST_LOG` is unset
    pub fn env_filter(&self) -> String {
        format!(
            "podcast_indexer={level},tower_http={level}",
            level = self.log_level
        )
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8082
}

fn default_request_timeout() -> u64 {
    30
}

fn default_pool_size() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_search_timeout() -> u64 {
    30
}

fn default_bulk_attempts() -> u32 {
    5
}

fn default_bulk_backoff() -> u64 {
    5
}

fn default_refresh_interval() -> u32 {
    10
}

fn default_shards() -> u32 {
    1
}

fn default_replicas() -> u32 {
    5
}

fn default_nested_fields_limit() -> u32 {
    200
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "podcast-indexer".to_string()
}
