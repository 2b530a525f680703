//! Core storage traits and abstractions.
//!
//! - [`Backend`] - lifecycle: identification, health, shutdown
//! - [`DissociationProvider`] - term and spatial set-difference queries
//! - [`DiagnosticsProvider`] - table counts and samples
//!
//! # Example: Implementing a Provider
//!
//! ```ignore
//! use async_trait::async_trait;
//! use dissoc_persistence::core::DissociationProvider;
//! use dissoc_persistence::error::StorageResult;
//! use dissoc_persistence::types::{SpatialDissociation, StudyRecord, TermDissociation};
//!
//! struct MyBackend;
//!
//! #[async_trait]
//! impl DissociationProvider for MyBackend {
//!     async fn dissociate_terms(
//!         &self,
//!         request: &TermDissociation,
//!     ) -> StorageResult<Vec<StudyRecord>> {
//!         todo!()
//!     }
//!
//!     async fn dissociate_locations(
//!         &self,
//!         request: &SpatialDissociation,
//!     ) -> StorageResult<Vec<StudyRecord>> {
//!         todo!()
//!     }
//! }
//! ```

pub mod backend;
pub mod diagnostics;
pub mod dissociation;

pub use backend::{Backend, BackendCapability, BackendKind};
pub use diagnostics::{DiagnosticsProvider, DiagnosticsReport, SAMPLE_SIZE};
pub use dissociation::DissociationProvider;
