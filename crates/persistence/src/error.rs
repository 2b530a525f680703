//! Error types for the persistence layer.
//!
//! This module defines all error types used by the dissociation engine,
//! separating input validation errors (raised before any query is built)
//! from backend errors (configuration, connectivity and query execution).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend-specific errors
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl StorageError {
    /// Returns true for connection-class failures that may succeed on a
    /// freshly acquired connection.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StorageError::Backend(BackendError::ConnectionFailed { .. })
        )
    }
}

/// Errors raised while validating caller input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A coordinate token did not contain exactly three numeric components.
    #[error("malformed coordinate '{token}': {reason}")]
    MalformedCoordinate { token: String, reason: String },

    /// A query parameter is outside its permitted range.
    #[error("invalid parameter {parameter}: {message}")]
    InvalidParameter { parameter: String, message: String },
}

impl ValidationError {
    pub(crate) fn malformed_coordinate(token: &str, reason: impl Into<String>) -> Self {
        ValidationError::MalformedCoordinate {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors originating in the storage backend.
#[derive(Error, Debug)]
pub enum BackendError {
    /// A required configuration value is absent.
    #[error("missing configuration: {variable} is not set")]
    ConfigurationMissing { variable: String },

    /// A configuration value is present but unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Connection to the backend failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryFailed { message: String },

    /// The statement was aborted before completing.
    #[error("query cancelled: {message}")]
    Cancelled { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
