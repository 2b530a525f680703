//! Core types for dissociation queries.
//!
//! - [`SearchPhrase`] / [`TermPair`] - normalized term input
//! - [`MniCoordinate`] / [`CoordinatePair`] - validated coordinate input
//! - [`TermDissociation`] / [`SpatialDissociation`] - query requests
//! - [`StudyRecord`] - query results

mod coordinate;
mod query;
mod study;
mod term;

pub use coordinate::{CoordinatePair, MniCoordinate};
pub use query::{
    DEFAULT_LOCATION_LIMIT, DEFAULT_PROXIMITY_RADIUS, DEFAULT_TERM_LIMIT, DissociationLimits,
    ProximityRadius, SpatialDissociation, TermDissociation,
};
pub use study::{StudyRecord, dedup_by_study, map_rows};
pub use term::{SearchPhrase, TermPair};
