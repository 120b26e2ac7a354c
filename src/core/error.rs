//! Error types for the cheese search service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to generate embedding: {0}")]
    EmbeddingFailure(String),

    #[error("Query execution failed: {0}")]
    QueryExecutionFailure(String),

    #[error("Malformed row {index}: missing field `{field}`")]
    MalformedRow { index: usize, field: &'static str },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sqlx::Error> for SearchError {
    fn from(err: sqlx::Error) -> Self {
        SearchError::QueryExecutionFailure(err.to_string())
    }
}

impl SearchError {
    /// Short machine-readable tag used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::InvalidInput(_) => "invalid_input",
            SearchError::EmbeddingFailure(_) => "embedding_failure",
            SearchError::QueryExecutionFailure(_) => "query_execution_failure",
            SearchError::MalformedRow { .. } => "malformed_row",
            SearchError::ConfigError(_) => "config_error",
            SearchError::SerializationError(_) => "serialization_error",
            SearchError::IoError(_) => "io_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            SearchError::EmbeddingFailure(_)
            | SearchError::QueryExecutionFailure(_)
            | SearchError::MalformedRow { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
