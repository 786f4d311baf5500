use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::ErrorResponse;

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    let status = StatusCode::NOT_FOUND;
    (status, Json(ErrorResponse::new(status, "resource not found"))).into_response()
}

/// Router fallback for a known path with an unsupported method.
pub async fn method_not_allowed() -> Response {
    let status = StatusCode::METHOD_NOT_ALLOWED;
    (status, Json(ErrorResponse::new(status, "method not allowed"))).into_response()
}
