pub mod handlers;
pub mod responses;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body returned for every non-validation error.
///
/// ```json
/// { "timestamp": "2024-11-29T10:15:30.120Z", "status": 404, "message": "user not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Body returned when request validation fails, one entry per invalid field.
///
/// ```json
/// { "timestamp": "...", "status": 400, "errors": { "email": "must not be blank" } }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub errors: BTreeMap<String, String>,
}

impl ValidationErrorResponse {
    pub fn new(errors: BTreeMap<String, String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: StatusCode::BAD_REQUEST.as_u16(),
            errors,
        }
    }
}

/// Message used for any 500; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(errors) => {
                let errors = field_messages(&errors);
                tracing::info!(?errors, "Validation failed");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse::new(errors)),
                )
                    .into_response();
            }
            AppError::JsonExtractorRejection(rejection) => {
                tracing::info!(%rejection, "Rejected request body");
                (StatusCode::BAD_REQUEST, rejection.body_text())
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                (StatusCode::CONFLICT, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}

/// First message per field, keyed by the camelCase name used in JSON bodies.
fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            let first = errs.first()?;
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| first.code.to_string());
            Some((to_camel_case(&field), message))
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
