//! Redis-backed result cache.
//!
//! Uses a `ConnectionManager`: a multiplexed connection that is cheap to clone
//! and safe to share across concurrent requests. Values are stored as the
//! shortest decimal string of the `f64`, which parses back to the same bits.

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::instrument;

use super::{CacheError, ResultCache};

#[derive(Clone)]
pub struct RedisResultCache {
    conn: ConnectionManager,
}

impl RedisResultCache {
    /// Open a managed connection to `redis_url`.
    ///
    /// Callers are expected to bound this with a timeout; the connection
    /// manager itself may retry the initial connect.
    pub async fn connect(redis_url: impl AsRef<str>) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        Ok(Self { conn })
    }
}

#[async_trait::async_trait]
impl ResultCache for RedisResultCache {
    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| CacheError::Connection(format!("PING failed: {e}")))?;
        Ok(())
    }

    #[instrument(skip(self), err)]
    async fn get(&self, key: &str) -> Result<Option<f64>, CacheError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CacheError::Command(format!("GET failed: {e}")))?;

        raw.as_deref().map(decode).transpose()
    }

    #[instrument(skip(self), err)]
    async fn set(&self, key: &str, value: f64) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(key, encode(value))
            .await
            .map_err(|e| CacheError::Command(format!("SET failed: {e}")))?;
        Ok(())
    }
}

fn encode(value: f64) -> String {
    value.to_string()
}

fn decode(raw: &str) -> Result<f64, CacheError> {
    raw.parse::<f64>()
        .map_err(|e| CacheError::Decode(format!("{raw:?}: {e}")))
}
