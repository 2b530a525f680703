//! Application state for the dissociation API.
//!
//! Holds the shared backend and configuration handed to every handler.

use std::sync::Arc;

use dissoc_persistence::core::Backend;
use dissoc_persistence::types::{DissociationLimits, ProximityRadius};

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `S` - The backend type (must implement [`Backend`])
///
/// # Example
///
/// ```rust,ignore
/// use dissoc_rest::{AppState, ServerConfig};
/// use dissoc_persistence::backends::postgres::{PostgresBackend, PostgresConfig};
/// use std::sync::Arc;
///
/// let backend = PostgresBackend::new(PostgresConfig::new("postgresql://localhost/studies"))?;
/// let state = AppState::new(Arc::new(backend), ServerConfig::default());
/// ```
pub struct AppState<S> {
    /// The storage backend.
    backend: Arc<S>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since S is wrapped in Arc and doesn't need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: Backend> AppState<S> {
    /// Creates a new AppState with the given backend and configuration.
    pub fn new(backend: Arc<S>, config: ServerConfig) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Returns a clone of the backend Arc.
    pub fn backend_arc(&self) -> Arc<S> {
        Arc::clone(&self.backend)
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Result caps for dissociation queries.
    pub fn limits(&self) -> DissociationLimits {
        self.config.limits()
    }

    /// Proximity radius for spatial dissociations.
    pub fn radius(&self) -> ProximityRadius {
        self.config.radius()
    }
}
