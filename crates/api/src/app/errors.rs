use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use ordersum_core::RequestError;

use crate::app::dto::ErrorBody;

/// Map a rejected request onto a `422` with every field error listed.
pub fn request_error_to_response(err: &RequestError) -> axum::response::Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        axum::Json(ErrorBody {
            detail: err.details(),
        }),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
