use serde::Serialize;

use ordersum_core::FieldError;

// -------------------------
// Response DTOs
// -------------------------

/// Body of every `422 Unprocessable Entity` response.
#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub detail: &'a [FieldError],
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct Greeting {
    pub message: &'static str,
}
