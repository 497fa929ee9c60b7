use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::search::SearchError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The request names a document type outside the closed set
    #[error("Unknown document type: {0}")]
    UnknownType(String),

    /// Snapshot source failure (relational store unavailable or query failed)
    #[error("Snapshot source error: {0}")]
    Source(#[from] sqlx::Error),

    /// Search engine failure (index, alias, or bulk operation)
    #[error("Search engine error: {0}")]
    Search(#[from] SearchError),

    /// Dispatched task lookup failure
    #[error("Task not found: {0}")]
    TaskNotFound(uuid::Uuid),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UnknownType(_) => StatusCode::BAD_REQUEST,
            AppError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Source(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Search(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::UnknownType(_) => "UNKNOWN_TYPE",
            AppError::TaskNotFound(_) => "TASK_NOT_FOUND",
            AppError::Source(_) => "SOURCE_FETCH_ERROR",
            AppError::Search(_) => "SEARCH_ENGINE_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::error!(
            error_code = error_code,
            status_code = status.as_u16(),
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16(),
            }
        }));

        (status, body).into_response()
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
