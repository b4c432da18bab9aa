//! Client configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storefront_commerce::search::{DEFAULT_PAGE_SIZE, LIMIT_PRESETS};

use crate::StorefrontError;

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "STOREFRONT_API_URL";

/// Storefront client configuration. Every section is optional in config files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Remote API.
    #[serde(default)]
    pub api: ApiConfig,

    /// Listing query cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Product listing behaviour.
    #[serde(default)]
    pub listing: ListingConfig,

    /// Local storage.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl StorefrontConfig {
    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(API_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// Check values that would otherwise fail later at request time.
    pub fn validate(&self) -> Result<(), StorefrontError> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(StorefrontError::Config(format!(
                "api.base_url must be an http(s) URL, got '{}'",
                url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(StorefrontError::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if !LIMIT_PRESETS.contains(&self.listing.page_size) {
            return Err(StorefrontError::Config(format!(
                "listing.page_size must be one of {:?}",
                LIMIT_PRESETS
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache.ttl_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.listing.debounce_ms)
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Query cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_ttl_ms() -> u64 {
    30_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

/// Product listing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Quiet period before search input is committed.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Default page size.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
        }
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file used as local storage. The CLI picks a per-user default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
