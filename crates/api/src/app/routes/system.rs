use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::app::{dto::Greeting, errors::json_error};

pub async fn root() -> impl IntoResponse {
    Json(Greeting {
        message: "Hello World",
    })
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "no such route")
}
