//! Backend abstraction for database drivers.
//!
//! This module defines the [`Backend`] trait, the lifecycle half of a storage
//! backend: identification, capability discovery, health checks and explicit
//! shutdown. Query behaviour lives in the provider traits.

use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::BackendError;

/// Identifies the type of database backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// PostgreSQL with the PostGIS extension.
    Postgres,
    /// Custom or unknown backend.
    Custom(&'static str),
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Postgres => write!(f, "postgres"),
            BackendKind::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Capabilities that a backend may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCapability {
    /// Stemming-aware natural-language phrase matching.
    FullTextSearch,
    /// Reference-system-aware distance predicates.
    SpatialSearch,
    /// Snapshot-consistent read transactions.
    Transactions,
    /// Table counts and row samples for operational checks.
    Diagnostics,
}

impl std::fmt::Display for BackendCapability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendCapability::FullTextSearch => "full-text-search",
            BackendCapability::SpatialSearch => "spatial-search",
            BackendCapability::Transactions => "transactions",
            BackendCapability::Diagnostics => "diagnostics",
        };
        write!(f, "{}", name)
    }
}

/// A database backend.
///
/// Backends are constructed explicitly during startup, shared behind an
/// `Arc` by every request, and closed explicitly during shutdown.
#[async_trait]
pub trait Backend: Send + Sync + Debug {
    /// Returns the kind of backend.
    fn kind(&self) -> BackendKind;

    /// Returns a human-readable name for this backend.
    fn name(&self) -> &'static str;

    /// Returns all capabilities supported by this backend.
    fn capabilities(&self) -> Vec<BackendCapability>;

    /// Checks if this backend supports the given capability.
    fn supports(&self, capability: BackendCapability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Checks if the backend is healthy and accepting connections.
    async fn health_check(&self) -> Result<(), BackendError>;

    /// Stops handing out connections and drops idle ones.
    fn close(&self);
}
