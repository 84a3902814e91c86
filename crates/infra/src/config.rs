//! Service configuration.
//!
//! Loaded from environment variables with fallback to defaults. A missing or
//! empty `REDIS_URL` is not an error: it simply leaves the cache disabled.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Default bound for cache connect/get/set.
pub const DEFAULT_CACHE_TIMEOUT_MS: u64 = 250;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

/// Cache backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Redis connection URL; `None` disables caching.
    pub redis_url: Option<String>,

    /// Upper bound on every cache round-trip.
    pub timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            timeout: Duration::from_millis(DEFAULT_CACHE_TIMEOUT_MS),
        }
    }
}

/// Top-level process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub cache: CacheConfig,
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup (used by tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))?;

        let redis_url = lookup("REDIS_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let timeout_ms: u64 = match lookup("CACHE_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("CACHE_TIMEOUT_MS".to_string()))?,
            None => DEFAULT_CACHE_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            return Err(ConfigError::InvalidValue("CACHE_TIMEOUT_MS".to_string()));
        }

        Ok(Self {
            bind_addr,
            cache: CacheConfig {
                redis_url,
                timeout: Duration::from_millis(timeout_ms),
            },
        })
    }
}
