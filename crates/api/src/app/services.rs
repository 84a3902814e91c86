use tracing::{debug, instrument, warn};

use ordersum_core::{ProcessRequest, RequestError};
use ordersum_infra::CacheGateway;

/// Request handler for `/solution`: validate, consult the cache, compute,
/// populate the cache.
///
/// The gateway is the only state shared between requests.
#[derive(Debug, Clone)]
pub struct SolutionService {
    cache: CacheGateway,
}

impl SolutionService {
    pub fn new(cache: CacheGateway) -> Self {
        Self { cache }
    }

    /// Validate a raw body and return the matching total.
    #[instrument(skip_all, fields(bytes = body.len()))]
    pub async fn solve(&self, body: &[u8]) -> Result<f64, RequestError> {
        let request = ProcessRequest::from_slice(body)?;
        debug!(
            orders = request.orders().len(),
            criterion = %request.criterion(),
            "request validated"
        );
        Ok(self.total(&request).await)
    }

    /// Total for an already-validated request, going through the cache when
    /// it is active.
    pub async fn total(&self, request: &ProcessRequest) -> f64 {
        if !self.cache.is_active() {
            return request.total();
        }

        let key = match CacheGateway::key_for(request) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "could not derive cache key; computing directly");
                return request.total();
            }
        };

        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let total = request.total();
        self.cache.set(&key, total).await;
        total
    }
}
