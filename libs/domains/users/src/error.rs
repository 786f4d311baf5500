use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Outcome of a failed store operation.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store rejected a write because of a unique constraint.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// An update targeted a row that does not exist.
    #[error("user {0} does not exist")]
    NotFound(Uuid),

    #[error("database error: {0}")]
    Database(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("user not found")]
    NotFound(Uuid),

    #[error("email already exists")]
    DuplicateEmail,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<RepositoryError> for UserError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // email is the only unique column a caller can write
            RepositoryError::UniqueViolation(detail) => {
                tracing::debug!(%detail, "Unique constraint violation");
                UserError::DuplicateEmail
            }
            RepositoryError::NotFound(id) => UserError::NotFound(id),
            RepositoryError::Database(msg) => UserError::Internal(msg),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(err.to_string()),
            UserError::DuplicateEmail => AppError::Conflict(err.to_string()),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
