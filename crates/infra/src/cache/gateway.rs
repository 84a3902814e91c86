//! Lookaside cache gateway.
//!
//! Constructed once at startup and shared by every request. When the backend
//! is unreachable at startup the gateway is `Disabled` for the life of the
//! process. When it is `Active`, every backend failure or timeout is logged
//! and treated as a miss: callers never see a cache error.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use ordersum_core::ProcessRequest;
use tracing::{debug, info, warn};

use super::{CacheError, ResultCache};
use crate::config::CacheConfig;

/// Prefix applied to every cache key.
pub const KEY_PREFIX: &str = "ordersum:solution:";

#[derive(Clone)]
pub enum CacheGateway {
    Active {
        backend: Arc<dyn ResultCache>,
        timeout: Duration,
    },
    Disabled,
}

impl core::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CacheGateway::Active { timeout, .. } => f
                .debug_struct("Active")
                .field("timeout", timeout)
                .finish_non_exhaustive(),
            CacheGateway::Disabled => f.write_str("Disabled"),
        }
    }
}

impl CacheGateway {
    /// Probe the configured backend once and pick a state.
    ///
    /// Never fails: a missing address, a bad URL, an unreachable server, or a
    /// probe that exceeds `config.timeout` all yield `Disabled`.
    pub async fn connect(config: &CacheConfig) -> Self {
        let Some(url) = config.redis_url.as_deref() else {
            info!("REDIS_URL not set; result cache disabled");
            return Self::Disabled;
        };

        #[cfg(feature = "redis")]
        {
            let probe = async {
                let backend = super::RedisResultCache::connect(url).await?;
                backend.ping().await?;
                Ok::<_, CacheError>(backend)
            };

            match bounded(config.timeout, probe).await {
                Ok(backend) => {
                    info!(timeout_ms = config.timeout.as_millis() as u64, "result cache enabled");
                    Self::active(Arc::new(backend), config.timeout)
                }
                Err(e) => {
                    warn!(error = %e, "result cache unreachable; continuing without cache");
                    Self::Disabled
                }
            }
        }

        #[cfg(not(feature = "redis"))]
        {
            warn!(redis_url = %url, "REDIS_URL set but redis feature not enabled; result cache disabled");
            Self::Disabled
        }
    }

    /// Probe an already-built backend once (used for injected backends).
    pub async fn probe(backend: Arc<dyn ResultCache>, timeout: Duration) -> Self {
        match bounded(timeout, backend.ping()).await {
            Ok(()) => Self::active(backend, timeout),
            Err(e) => {
                warn!(error = %e, "result cache unreachable; continuing without cache");
                Self::Disabled
            }
        }
    }

    pub fn active(backend: Arc<dyn ResultCache>, timeout: Duration) -> Self {
        Self::Active { backend, timeout }
    }

    pub fn disabled() -> Self {
        Self::Disabled
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Cache key for a validated request.
    ///
    /// The request is serialized in declaration order (`orders` then
    /// `criterion`; order fields `id`, `item`, `quantity`, `price`, `status`)
    /// with the order list kept as submitted. The key is built from the
    /// validated model rather than the raw body on purpose: extra fields and
    /// incoming key order never change the result, so they stay out of the key.
    pub fn key_for(request: &ProcessRequest) -> Result<String, CacheError> {
        let body = serde_json::to_string(request).map_err(|e| CacheError::Encode(e.to_string()))?;
        Ok(format!("{KEY_PREFIX}{body}"))
    }

    /// Look up a cached total. Any failure is reported as a miss.
    pub async fn get(&self, key: &str) -> Option<f64> {
        let Self::Active { backend, timeout } = self else {
            return None;
        };

        match bounded(*timeout, backend.get(key)).await {
            Ok(hit) => {
                debug!(hit = hit.is_some(), "result cache lookup");
                hit
            }
            Err(e) => {
                warn!(error = %e, "result cache lookup failed; computing directly");
                None
            }
        }
    }

    /// Store a total, best-effort. Failures are logged and dropped.
    pub async fn set(&self, key: &str, value: f64) {
        let Self::Active { backend, timeout } = self else {
            return;
        };

        if let Err(e) = bounded(*timeout, backend.set(key, value)).await {
            warn!(error = %e, "result cache store failed");
        }
    }
}

async fn bounded<T>(
    limit: Duration,
    fut: impl Future<Output = Result<T, CacheError>>,
) -> Result<T, CacheError> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| CacheError::Timeout)?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryResultCache;
    use ordersum_core::{Criterion, Order, OrderStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that fails every call.
    struct BrokenCache;

    #[async_trait::async_trait]
    impl ResultCache for BrokenCache {
        async fn ping(&self) -> Result<(), CacheError> {
            Err(CacheError::Connection("refused".to_string()))
        }

        async fn get(&self, _key: &str) -> Result<Option<f64>, CacheError> {
            Err(CacheError::Command("boom".to_string()))
        }

        async fn set(&self, _key: &str, _value: f64) -> Result<(), CacheError> {
            Err(CacheError::Command("boom".to_string()))
        }
    }

    /// Backend that never answers within any reasonable bound.
    #[derive(Default)]
    struct StalledCache {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl ResultCache for StalledCache {
        async fn ping(&self) -> Result<(), CacheError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }

        async fn get(&self, _key: &str) -> Result<Option<f64>, CacheError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Some(1.0))
        }

        async fn set(&self, _key: &str, _value: f64) -> Result<(), CacheError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        }
    }

    fn sample_request(criterion: Criterion) -> ProcessRequest {
        ProcessRequest::new(
            vec![
                Order::new(1, "Laptop", 1, 999.99, OrderStatus::Completed).unwrap(),
                Order::new(2, "Smartphone", 2, 499.95, OrderStatus::Pending).unwrap(),
            ],
            criterion,
        )
    }

    const TIMEOUT: Duration = Duration::from_millis(50);

    #[tokio::test]
    async fn active_gateway_round_trips_values() {
        let gw = CacheGateway::active(Arc::new(InMemoryResultCache::new()), TIMEOUT);
        assert!(gw.is_active());

        assert_eq!(gw.get("k").await, None);
        gw.set("k", 1299.69).await;
        assert_eq!(gw.get("k").await, Some(1299.69));
    }

    #[tokio::test]
    async fn disabled_gateway_never_hits() {
        let gw = CacheGateway::disabled();
        gw.set("k", 1.0).await;
        assert_eq!(gw.get("k").await, None);
        assert!(!gw.is_active());
    }

    #[tokio::test]
    async fn backend_errors_fail_open() {
        let gw = CacheGateway::active(Arc::new(BrokenCache), TIMEOUT);
        assert_eq!(gw.get("k").await, None);
        gw.set("k", 1.0).await;
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_times_out_as_miss() {
        let backend = Arc::new(StalledCache::default());
        let gw = CacheGateway::active(backend.clone(), TIMEOUT);

        assert_eq!(gw.get("k").await, None);
        gw.set("k", 1.0).await;
        assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn probe_failure_disables_gateway() {
        let gw = CacheGateway::probe(Arc::new(BrokenCache), TIMEOUT).await;
        assert!(!gw.is_active());

        let gw = CacheGateway::probe(Arc::new(InMemoryResultCache::new()), TIMEOUT).await;
        assert!(gw.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_probe_disables_gateway() {
        let gw = CacheGateway::probe(Arc::new(StalledCache::default()), TIMEOUT).await;
        assert!(!gw.is_active());
    }

    #[tokio::test]
    async fn missing_url_disables_gateway() {
        let gw = CacheGateway::connect(&CacheConfig::default()).await;
        assert!(!gw.is_active());
    }

    #[tokio::test]
    async fn unreachable_url_disables_gateway() {
        let config = CacheConfig {
            redis_url: Some("redis://127.0.0.1:1/".to_string()),
            timeout: Duration::from_millis(200),
        };
        let gw = CacheGateway::connect(&config).await;
        assert!(!gw.is_active());
    }

    #[test]
    fn key_is_stable_and_criterion_sensitive() {
        let a = CacheGateway::key_for(&sample_request(Criterion::Pending)).unwrap();
        let b = CacheGateway::key_for(&sample_request(Criterion::Pending)).unwrap();
        let c = CacheGateway::key_for(&sample_request(Criterion::All)).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with(KEY_PREFIX));
        assert_eq!(
            a,
            format!(
                "{KEY_PREFIX}{}",
                r#"{"orders":[{"id":1,"item":"Laptop","quantity":1,"price":999.99,"status":"completed"},{"id":2,"item":"Smartphone","quantity":2,"price":499.95,"status":"pending"}],"criterion":"pending"}"#
            )
        );
    }

    #[test]
    fn key_preserves_order_sequence() {
        let orders = sample_request(Criterion::All).orders().to_vec();
        let reversed: Vec<Order> = orders.iter().rev().cloned().collect();

        let a = CacheGateway::key_for(&ProcessRequest::new(orders, Criterion::All)).unwrap();
        let b = CacheGateway::key_for(&ProcessRequest::new(reversed, Criterion::All)).unwrap();
        assert_ne!(a, b);
    }
}
