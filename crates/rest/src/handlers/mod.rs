//! HTTP request handlers.
//!
//! - [`dissociate`] - term and spatial dissociation queries
//! - [`studies`] - single-term and single-location echo endpoints
//! - [`diagnostics`] - table counts and samples (`/test_db`)
//! - [`health`] - health, liveness and readiness probes
//! - [`image`] - static image endpoint

pub mod diagnostics;
pub mod dissociate;
pub mod health;
pub mod image;
pub mod studies;

// Re-export handlers for convenience
pub use diagnostics::diagnostics_handler;
pub use dissociate::{dissociate_locations_handler, dissociate_terms_handler};
pub use health::{health_handler, liveness_handler, readiness_handler, root_handler};
pub use image::image_handler;
pub use studies::{location_studies_handler, term_studies_handler};
