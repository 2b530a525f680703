//! Axum extractors for dissociation path segments.
//!
//! - [`TermPairPath`] - two underscore-joined term tokens
//! - [`CoordinatePath`] - one `x_y_z` coordinate token
//! - [`CoordinatePairPath`] - two `x_y_z` coordinate tokens
//!
//! Malformed segments are rejected with a 400 before any handler runs.

mod coordinates;
mod terms;

pub use coordinates::{CoordinatePairPath, CoordinatePath};
pub use terms::TermPairPath;
