//! Result cache: backend abstraction and the fail-open gateway in front of it.
//!
//! The backend trait is deliberately small (ping/get/set). Everything about
//! timeouts, degradation, and logging lives in [`CacheGateway`], so backends
//! only need to report what went wrong.

mod gateway;
mod in_memory;
#[cfg(feature = "redis")]
mod redis_cache;

pub use gateway::{CacheGateway, KEY_PREFIX};
pub use in_memory::InMemoryResultCache;
#[cfg(feature = "redis")]
pub use redis_cache::RedisResultCache;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    Connection(String),

    #[error("cache command error: {0}")]
    Command(String),

    #[error("cache key encoding error: {0}")]
    Encode(String),

    #[error("cached value could not be decoded: {0}")]
    Decode(String),

    #[error("cache operation timed out")]
    Timeout,
}

/// Key/value store for computed totals.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait::async_trait]
pub trait ResultCache: Send + Sync {
    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheError>;

    /// Look up a previously stored total.
    async fn get(&self, key: &str) -> Result<Option<f64>, CacheError>;

    /// Store a total. Overwrites any existing value (last write wins).
    async fn set(&self, key: &str, value: f64) -> Result<(), CacheError>;
}
