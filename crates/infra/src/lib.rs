//! Infrastructure layer: result cache backends, the cache gateway, config.

pub mod cache;
pub mod config;

pub use cache::{CacheError, CacheGateway, InMemoryResultCache, ResultCache};
pub use config::{CacheConfig, ConfigError, ServiceConfig};
