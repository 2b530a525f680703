//! Study records returned by dissociation queries.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A study in a dissociation result.
///
/// `title` comes from the left-joined metadata table and is `None` when the
/// study has no metadata row. It is always serialized, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StudyRecord {
    /// Opaque study identifier.
    pub study_id: String,
    /// Human-readable title, if known.
    pub title: Option<String>,
}

impl StudyRecord {
    /// Creates a record.
    pub fn new(study_id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            study_id: study_id.into(),
            title,
        }
    }
}

impl From<(String, Option<String>)> for StudyRecord {
    fn from((study_id, title): (String, Option<String>)) -> Self {
        Self { study_id, title }
    }
}

/// Maps raw `(study_id, title)` rows into study records, preserving order.
///
/// Zero rows yield an empty vector.
pub fn map_rows<I>(rows: I) -> Vec<StudyRecord>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    rows.into_iter().map(StudyRecord::from).collect()
}

/// Drops repeated study identifiers, keeping the first occurrence.
///
/// A study with several metadata rows comes back once per title from a
/// `SELECT DISTINCT` over `(study_id, title)`; results are per study.
pub fn dedup_by_study(records: Vec<StudyRecord>) -> Vec<StudyRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.study_id.clone()))
        .collect()
}
