use axum::{
    routing::{get, post},
    Router,
};

pub mod solution;
pub mod system;

/// Router for every endpoint the service exposes.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/solution", post(solution::solve))
        .fallback(system::not_found)
}
