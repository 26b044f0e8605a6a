use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_BASE_URL;
use crate::crossref::DEFAULT_DATASET_URL;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub provider: ProviderConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// Catalog API key (required).
    pub api_key: String,
    /// Catalog base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Identity dataset URL.
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,
    /// Request timeout in seconds (default: 30). Bounds every network
    /// call the provider makes.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Cache TTL configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// How long the identity dataset is served without revalidation.
    #[serde(default = "default_content_ttl")]
    pub content_ttl_secs: u64,
    /// How long a stale dataset and its validator stay usable for
    /// conditional requests.
    #[serde(default = "default_validator_ttl")]
    pub validator_ttl_secs: u64,
    /// How long catalog responses are cached per call signature.
    #[serde(default = "default_catalog_ttl")]
    pub catalog_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            content_ttl_secs: default_content_ttl(),
            validator_ttl_secs: default_validator_ttl(),
            catalog_ttl_secs: default_catalog_ttl(),
        }
    }
}

fn default_content_ttl() -> u64 {
    24 * 60 * 60
}

fn default_validator_ttl() -> u64 {
    30 * 24 * 60 * 60
}

fn default_catalog_ttl() -> u64 {
    3 * 24 * 60 * 60
}

/// Sanitized config for display (API key redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub provider: SanitizedProviderConfig,
    pub cache: CacheConfig,
}

/// Sanitized provider config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedProviderConfig {
    pub api_key_configured: bool,
    pub base_url: String,
    pub dataset_url: String,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            provider: SanitizedProviderConfig {
                api_key_configured: !config.provider.api_key.is_empty(),
                base_url: config.provider.base_url.clone(),
                dataset_url: config.provider.dataset_url.clone(),
                timeout_secs: config.provider.timeout_secs,
            },
            cache: config.cache.clone(),
        }
    }
}
