//! Dissociation query engine over a neuroimaging study database.
//!
//! A dissociation is a set difference over studies: the studies matching one
//! criterion that do not match a second one. Two kinds are supported:
//!
//! - **Term dissociation**: studies annotated with term A but not term B,
//!   matched by full-text search over classifier annotations.
//! - **Spatial dissociation**: studies reporting a peak near coordinate A but
//!   none near coordinate B, in MNI space.
//!
//! Results are `(study_id, title)` records, deduplicated by study.
//!
//! # Architecture
//!
//! - [`types`] - term phrases, coordinates, query requests, study records
//! - [`error`] - error types for all operations
//! - [`core`] - provider traits
//! - [`backends`] - the PostgreSQL/PostGIS implementation
//!
//! # Input normalization
//!
//! ```
//! use dissoc_persistence::types::{MniCoordinate, SearchPhrase};
//!
//! let phrase = SearchPhrase::from_token("working_memory");
//! assert_eq!(phrase.as_str(), "working memory");
//!
//! let point: MniCoordinate = "0_-52_26".parse().unwrap();
//! assert_eq!(point.to_array(), [0.0, -52.0, 26.0]);
//!
//! assert!(MniCoordinate::parse("0_-52").is_err());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{BackendError, StorageError, StorageResult, ValidationError};
pub use types::{MniCoordinate, SearchPhrase, SpatialDissociation, StudyRecord, TermDissociation};

// Re-export core traits
pub use core::{Backend, BackendKind, DiagnosticsProvider, DissociationProvider};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
