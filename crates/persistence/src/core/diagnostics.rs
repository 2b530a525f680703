//! Operational diagnostics.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageResult;

/// Number of sample rows taken from each table.
pub const SAMPLE_SIZE: i64 = 3;

/// Row counts and small samples of the study tables.
///
/// Samples are best effort: a failing sample query leaves its sample empty
/// instead of failing the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    /// Database server version string.
    pub version: String,
    /// Rows in the coordinates table.
    pub coordinates_count: i64,
    /// Rows in the metadata table.
    pub metadata_count: i64,
    /// Rows in the term annotations table.
    pub annotations_terms_count: i64,
    /// Up to [`SAMPLE_SIZE`] coordinates as `{study_id, x, y, z}`.
    pub coordinates_sample: Vec<Value>,
    /// Up to [`SAMPLE_SIZE`] metadata rows, all columns.
    pub metadata_sample: Vec<Value>,
    /// Up to [`SAMPLE_SIZE`] annotations as `{study_id, contrast_id, term, weight}`.
    pub annotations_terms_sample: Vec<Value>,
}

/// Backends that can describe their table contents.
#[async_trait]
pub trait DiagnosticsProvider: Send + Sync {
    /// SQL dialect name reported alongside the diagnostics (`postgresql`).
    fn dialect(&self) -> &'static str;

    /// Collects counts and samples inside one read-only transaction.
    async fn diagnostics(&self) -> StorageResult<DiagnosticsReport>;
}
