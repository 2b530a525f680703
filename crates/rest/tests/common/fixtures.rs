//! Seeded studies and test server construction.

use std::sync::Arc;

use axum_test::TestServer;
use dissoc_persistence::types::MniCoordinate;
use dissoc_rest::{ServerConfig, create_app_with_config};

use super::memory::{MemoryBackend, MemoryStudy};

fn study(id: &str, title: Option<&str>, terms: &[&str], points: &[[f64; 3]]) -> MemoryStudy {
    MemoryStudy {
        study_id: id.to_string(),
        title: title.map(str::to_string),
        terms: terms.iter().map(|t| t.to_string()).collect(),
        points: points
            .iter()
            .map(|[x, y, z]| MniCoordinate::new(*x, *y, *z))
            .collect(),
    }
}

/// Five studies:
///
/// | id | terms | peaks |
/// |----|-------|-------|
/// | s1 | emotion | (0,0,0) |
/// | s2 | emotion, memory | (0,0,0), (30,0,0) |
/// | s3 | visual | (30,0,0) |
/// | s4 (no title) | emotion | (5,0,0) |
/// | s5 | working memory | (-40,20,10) |
pub fn studies() -> Vec<MemoryStudy> {
    vec![
        study(
            "s1",
            Some("Fear conditioning in the amygdala"),
            &["terms_abstract__emotion"],
            &[[0.0, 0.0, 0.0]],
        ),
        study(
            "s2",
            Some("Emotional memory consolidation"),
            &["terms_abstract__emotion", "terms_abstract__memory"],
            &[[0.0, 0.0, 0.0], [30.0, 0.0, 0.0]],
        ),
        study(
            "s3",
            Some("Visual cortex mapping"),
            &["terms_abstract__visual"],
            &[[30.0, 0.0, 0.0]],
        ),
        study("s4", None, &["terms_fulltext__emotion"], &[[5.0, 0.0, 0.0]]),
        study(
            "s5",
            Some("Working memory load"),
            &["terms_abstract__working memory"],
            &[[-40.0, 20.0, 10.0]],
        ),
    ]
}

/// Creates a test server over the given backend.
pub fn create_server(backend: MemoryBackend, config: ServerConfig) -> (TestServer, Arc<MemoryBackend>) {
    let backend = Arc::new(backend);
    let app = create_app_with_config(Arc::clone(&backend), config);
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, backend)
}

/// Creates a test server over the seeded studies with the testing config.
pub fn seeded_server() -> (TestServer, Arc<MemoryBackend>) {
    create_server(MemoryBackend::new(studies()), ServerConfig::for_testing())
}
