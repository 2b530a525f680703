//! Error types for the dissociation API.
//!
//! Every error is rendered as a JSON body `{"error": <kind>, "message": <text>}`.
//!
//! # Error Mapping
//!
//! | Storage Error | HTTP Status | Kind |
//! |--------------|-------------|------|
//! | MalformedCoordinate | 400 | malformed_input |
//! | InvalidParameter | 400 | invalid_parameter |
//! | ConnectionFailed | 503 | connection_failure |
//! | Cancelled | 504 | cancelled |
//! | ConfigurationMissing / InvalidConfiguration | 500 | configuration_missing |
//! | QueryFailed | 500 | query_failure |
//! | Internal | 500 | internal |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dissoc_persistence::error::{BackendError, StorageError, ValidationError};
use thiserror::Error;

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// A path segment could not be parsed (HTTP 400).
    #[error("Malformed input: {message}")]
    MalformedInput {
        /// Error message.
        message: String,
    },

    /// A parameter is outside its permitted range (HTTP 400).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Error message.
        message: String,
    },

    /// The requested file or route does not exist (HTTP 404).
    #[error("Not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// The database could not be reached (HTTP 503).
    #[error("Connection failure: {message}")]
    ConnectionFailure {
        /// Error message.
        message: String,
    },

    /// The query was aborted before it completed (HTTP 504).
    #[error("Query cancelled: {message}")]
    Cancelled {
        /// Error message.
        message: String,
    },

    /// The server is missing required configuration (HTTP 500).
    #[error("Configuration missing: {message}")]
    ConfigurationMissing {
        /// Error message.
        message: String,
    },

    /// The database rejected the query (HTTP 500).
    #[error("Query failure: {message}")]
    QueryFailure {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("Internal error: {message}")]
    InternalError {
        /// Error message.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::MalformedInput { .. } | RestError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::ConnectionFailure { .. } => StatusCode::SERVICE_UNAVAILABLE,
            RestError::Cancelled { .. } => StatusCode::GATEWAY_TIMEOUT,
            RestError::ConfigurationMissing { .. }
            | RestError::QueryFailure { .. }
            | RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RestError::MalformedInput { .. } => "malformed_input",
            RestError::InvalidParameter { .. } => "invalid_parameter",
            RestError::NotFound { .. } => "not_found",
            RestError::ConnectionFailure { .. } => "connection_failure",
            RestError::Cancelled { .. } => "cancelled",
            RestError::ConfigurationMissing { .. } => "configuration_missing",
            RestError::QueryFailure { .. } => "query_failure",
            RestError::InternalError { .. } => "internal",
        }
    }

    fn message(&self) -> &str {
        match self {
            RestError::MalformedInput { message }
            | RestError::InvalidParameter { message }
            | RestError::NotFound { message }
            | RestError::ConnectionFailure { message }
            | RestError::Cancelled { message }
            | RestError::ConfigurationMissing { message }
            | RestError::QueryFailure { message }
            | RestError::InternalError { message } => message,
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "Request failed");
        } else {
            tracing::debug!(kind = self.kind(), error = %self, "Request rejected");
        }

        let body = serde_json::json!({
            "error": self.kind(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

// Implement conversions from storage errors

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Validation(e) => e.into(),
            StorageError::Backend(e) => e.into(),
        }
    }
}

impl From<ValidationError> for RestError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MalformedCoordinate { .. } => RestError::MalformedInput {
                message: err.to_string(),
            },
            ValidationError::InvalidParameter { .. } => RestError::InvalidParameter {
                message: err.to_string(),
            },
        }
    }
}

impl From<BackendError> for RestError {
    fn from(err: BackendError) -> Self {
        let message = err.to_string();
        match err {
            BackendError::ConfigurationMissing { .. } | BackendError::InvalidConfiguration { .. } => {
                RestError::ConfigurationMissing { message }
            }
            BackendError::ConnectionFailed { .. } => RestError::ConnectionFailure { message },
            BackendError::QueryFailed { .. } => RestError::QueryFailure { message },
            BackendError::Cancelled { .. } => RestError::Cancelled { message },
            BackendError::Internal { .. } => RestError::InternalError { message },
        }
    }
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;
