//! Engine configuration
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//!
//! ```toml
//! cache_capacity = 128        # 0 disables the query cache
//! cache_policy = "unbounded"  # "unbounded" | "versioned" | "ttl"
//! cache_ttl_ms = 5000         # required when cache_policy = "ttl"
//! default_k = 10
//! canonicalize_tags = false
//! initial_capacity = 0
//! ```

use crate::cache::CachePolicy;
use postindex_core::DEFAULT_K;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default number of memoized query results
pub const DEFAULT_CACHE_CAPACITY: usize = 128;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config text is not valid TOML for [`EngineConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parse but do not make sense together
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which staleness rule the query cache applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicyKind {
    /// Never invalidated by inserts
    #[default]
    Unbounded,
    /// Dropped once the collection has changed
    Versioned,
    /// Dropped after `cache_ttl_ms`
    Ttl,
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum memoized queries (LRU); 0 disables caching
    pub cache_capacity: usize,
    /// Cache staleness rule
    pub cache_policy: CachePolicyKind,
    /// Entry lifetime for the `ttl` policy, in milliseconds
    pub cache_ttl_ms: Option<u64>,
    /// Limit used when a query does not set `k`
    pub default_k: usize,
    /// Sort and dedup tags before keying the cache
    pub canonicalize_tags: bool,
    /// Posts to pre-allocate room for
    pub initial_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_policy: CachePolicyKind::Unbounded,
            cache_ttl_ms: None,
            default_k: DEFAULT_K,
            canonicalize_tags: false,
            initial_capacity: 0,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that the settings are consistent
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache_policy().map(|_| ())
    }

    /// Resolve the runtime cache policy
    pub fn cache_policy(&self) -> Result<CachePolicy, ConfigError> {
        match self.cache_policy {
            CachePolicyKind::Unbounded => Ok(CachePolicy::Unbounded),
            CachePolicyKind::Versioned => Ok(CachePolicy::Versioned),
            CachePolicyKind::Ttl => match self.cache_ttl_ms {
                Some(ms) if ms > 0 => Ok(CachePolicy::Ttl(Duration::from_millis(ms))),
                _ => Err(ConfigError::Invalid(
                    "cache_policy = \"ttl\" requires a positive cache_ttl_ms".to_string(),
                )),
            },
        }
    }
}
