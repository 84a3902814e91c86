use std::sync::Arc;

use axum::{body::Bytes, extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::{errors, services::SolutionService};

/// `POST /solution`: total of the orders matching the criterion.
///
/// The body is read as raw bytes so that malformed JSON surfaces as a
/// `parse_error` detail rather than an extractor rejection, whatever the
/// `Content-Type`.
pub async fn solve(
    Extension(service): Extension<Arc<SolutionService>>,
    body: Bytes,
) -> axum::response::Response {
    match service.solve(&body).await {
        Ok(total) => (StatusCode::OK, Json(total)).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "request rejected");
            errors::request_error_to_response(&e)
        }
    }
}
