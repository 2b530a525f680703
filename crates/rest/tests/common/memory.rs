//! In-memory dissociation backend.
//!
//! Evaluates dissociations over a handful of studies held in memory. Phrase
//! matching is word containment after stripping the `terms_<source>__`
//! prefix; proximity is Euclidean distance. Every request is recorded so
//! tests can check what reached the backend.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dissoc_persistence::core::{
    Backend, BackendCapability, BackendKind, DiagnosticsProvider, DiagnosticsReport,
    DissociationProvider,
};
use dissoc_persistence::error::{BackendError, StorageError, StorageResult};
use dissoc_persistence::types::{
    MniCoordinate, SearchPhrase, SpatialDissociation, StudyRecord, TermDissociation,
};
use serde_json::json;

/// A study with its annotations and reported peaks.
#[derive(Debug, Clone)]
pub struct MemoryStudy {
    pub study_id: String,
    pub title: Option<String>,
    pub terms: Vec<String>,
    pub points: Vec<MniCoordinate>,
}

/// Failure injected into every backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Connection,
    Query,
    Cancelled,
}

impl Failure {
    fn to_error(self) -> StorageError {
        match self {
            Failure::Connection => StorageError::Backend(BackendError::ConnectionFailed {
                backend_name: "memory".to_string(),
                message: "connection refused".to_string(),
            }),
            Failure::Query => StorageError::Backend(BackendError::QueryFailed {
                message: "relation \"ns.annotations_terms\" does not exist".to_string(),
            }),
            Failure::Cancelled => StorageError::Backend(BackendError::Cancelled {
                message: "canceling statement due to statement timeout".to_string(),
            }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    studies: Vec<MemoryStudy>,
    failure: Option<Failure>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_terms: Mutex<Option<TermDissociation>>,
    last_locations: Mutex<Option<SpatialDissociation>>,
}

impl MemoryBackend {
    pub fn new(studies: Vec<MemoryStudy>) -> Self {
        Self {
            studies,
            ..Default::default()
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Default::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of query calls that reached the backend.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_terms(&self) -> Option<TermDissociation> {
        self.last_terms.lock().unwrap().clone()
    }

    pub fn last_locations(&self) -> Option<SpatialDissociation> {
        self.last_locations.lock().unwrap().clone()
    }

    async fn enter(&self) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.failure {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn record(study: &MemoryStudy) -> StudyRecord {
        StudyRecord::new(study.study_id.clone(), study.title.clone())
    }
}

fn strip_prefix(term: &str) -> &str {
    if let Some(rest) = term.strip_prefix("terms_") {
        if let Some((source, stripped)) = rest.split_once("__") {
            if !source.is_empty() && !source.contains('_') {
                return stripped;
            }
        }
    }
    term
}

fn matches(term: &str, phrase: &SearchPhrase) -> bool {
    let words: Vec<String> = strip_prefix(term)
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let wanted: Vec<String> = phrase
        .as_str()
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    !wanted.is_empty() && wanted.iter().all(|w| words.contains(w))
}

#[async_trait]
impl Backend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Custom("memory")
    }

    fn name(&self) -> &'static str {
        "memory"
    }

    fn capabilities(&self) -> Vec<BackendCapability> {
        vec![
            BackendCapability::FullTextSearch,
            BackendCapability::SpatialSearch,
            BackendCapability::Diagnostics,
        ]
    }

    async fn health_check(&self) -> Result<(), BackendError> {
        match self.failure {
            Some(Failure::Connection) => Err(BackendError::ConnectionFailed {
                backend_name: "memory".to_string(),
                message: "connection refused".to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn close(&self) {}
}

#[async_trait]
impl DissociationProvider for MemoryBackend {
    async fn dissociate_terms(
        &self,
        request: &TermDissociation,
    ) -> StorageResult<Vec<StudyRecord>> {
        *self.last_terms.lock().unwrap() = Some(request.clone());
        self.enter().await?;

        let include = &request.terms.include;
        let exclude = &request.terms.exclude;
        Ok(self
            .studies
            .iter()
            .filter(|s| s.terms.iter().any(|t| matches(t, include)))
            .filter(|s| !s.terms.iter().any(|t| matches(t, exclude)))
            .take(request.limit as usize)
            .map(Self::record)
            .collect())
    }

    async fn dissociate_locations(
        &self,
        request: &SpatialDissociation,
    ) -> StorageResult<Vec<StudyRecord>> {
        *self.last_locations.lock().unwrap() = Some(request.clone());
        self.enter().await?;

        let radius = request.radius.value();
        let near = |study: &MemoryStudy, point: &MniCoordinate| {
            study.points.iter().any(|p| p.distance_to(point) <= radius)
        };
        Ok(self
            .studies
            .iter()
            .filter(|s| near(s, &request.points.include))
            .filter(|s| !near(s, &request.points.exclude))
            .take(request.limit as usize)
            .map(Self::record)
            .collect())
    }
}

#[async_trait]
impl DiagnosticsProvider for MemoryBackend {
    fn dialect(&self) -> &'static str {
        "memory-sql"
    }

    async fn diagnostics(&self) -> StorageResult<DiagnosticsReport> {
        self.enter().await?;

        let coordinates: Vec<_> = self
            .studies
            .iter()
            .flat_map(|s| {
                s.points
                    .iter()
                    .map(move |p| json!({"study_id": s.study_id, "x": p.x, "y": p.y, "z": p.z}))
            })
            .collect();
        let metadata: Vec<_> = self
            .studies
            .iter()
            .filter_map(|s| {
                s.title
                    .as_ref()
                    .map(|t| json!({"study_id": s.study_id, "title": t}))
            })
            .collect();
        let annotations: Vec<_> = self
            .studies
            .iter()
            .flat_map(|s| {
                s.terms
                    .iter()
                    .map(move |t| json!({"study_id": s.study_id, "term": t}))
            })
            .collect();

        Ok(DiagnosticsReport {
            version: "memory 1.0".to_string(),
            coordinates_count: coordinates.len() as i64,
            metadata_count: metadata.len() as i64,
            annotations_terms_count: annotations.len() as i64,
            coordinates_sample: coordinates.into_iter().take(3).collect(),
            metadata_sample: metadata.into_iter().take(3).collect(),
            annotations_terms_sample: annotations.into_iter().take(3).collect(),
        })
    }
}
