//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the request handler (validation, cache, compute)
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: response bodies
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use ordersum_infra::{CacheGateway, ServiceConfig};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// The cache backend is probed exactly once here.
pub async fn build_app(config: &ServiceConfig) -> Router {
    let cache = CacheGateway::connect(&config.cache).await;
    router(Arc::new(services::SolutionService::new(cache)))
}

/// Router over an already-built service (tests inject their own gateway).
pub fn router(service: Arc<services::SolutionService>) -> Router {
    routes::router()
        .layer(Extension(service))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)))
}
