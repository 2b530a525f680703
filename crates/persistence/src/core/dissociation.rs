//! Dissociation provider trait.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::{SpatialDissociation, StudyRecord, TermDissociation};

/// Set-difference queries over studies.
///
/// Both operations are evaluated at study granularity: a study matches the
/// include criterion if *any* of its annotations (or coordinates) does, and
/// is excluded if *any* of them matches the exclude criterion. Results are
/// distinct per study, capped at the request limit, and carry no ordering
/// guarantee.
///
/// Dropping a returned future aborts the query and releases its connection.
#[async_trait]
pub trait DissociationProvider: Send + Sync {
    /// Studies with an annotation matching `include` and none matching `exclude`.
    ///
    /// Annotation terms have any `terms_<source>__` namespace prefix stripped
    /// before full-text matching.
    async fn dissociate_terms(&self, request: &TermDissociation)
    -> StorageResult<Vec<StudyRecord>>;

    /// Studies with a coordinate within `radius` of `include` and none within
    /// `radius` of `exclude`.
    async fn dissociate_locations(
        &self,
        request: &SpatialDissociation,
    ) -> StorageResult<Vec<StudyRecord>>;
}
