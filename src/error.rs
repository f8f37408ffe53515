//! Unified error type for handlers and startup.
//!
//! Every handler returns `Result<T, AppError>`; the `ResponseError` impl turns
//! the error into a JSON body with the right status code.

use actix_web::{error::BlockingError, http::StatusCode, HttpResponse, ResponseError};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DieselError),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Blocking task failed: {0}")]
    Blocking(#[from] BlockingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload error: {0}")]
    Multipart(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Maps a Diesel `NotFound` to a named 404, leaving other errors untouched.
    pub fn or_not_found(err: DieselError, entity: &'static str) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound(entity),
            other => Self::Database(other),
        }
    }
}

impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        Self::Multipart(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Database(DieselError::NotFound) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::Database(DieselError::DatabaseError(kind, _)) => match kind {
                DatabaseErrorKind::UniqueViolation => StatusCode::CONFLICT,
                DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            match self {
                Self::Database(DieselError::DatabaseError(kind, info)) => {
                    tracing::warn!(error = info.message(), "constraint violation");
                    violation_message(kind).to_string()
                }
                Self::Database(DieselError::NotFound) => "Record not found".to_string(),
                other => other.to_string(),
            }
        };
        HttpResponse::build(status).json(json!({ "message": message }))
    }
}

fn violation_message(kind: &DatabaseErrorKind) -> &'static str {
    match kind {
        DatabaseErrorKind::UniqueViolation => "A record with this value already exists",
        DatabaseErrorKind::ForeignKeyViolation => "Referenced record does not exist",
        DatabaseErrorKind::NotNullViolation => "A required field is missing",
        DatabaseErrorKind::CheckViolation => "A value failed a constraint check",
        _ => "Request rejected by the database",
    }
}
