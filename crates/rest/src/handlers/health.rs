//! Health check endpoint handlers.
//!
//! Provides the root page and probes for monitoring and load balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use dissoc_persistence::core::Backend;
use tracing::debug;

use crate::state::AppState;

/// Handler for the root page.
///
/// # HTTP Request
///
/// `GET [base]/`
pub async fn root_handler() -> Html<&'static str> {
    Html("<p>Server working!</p>")
}

/// Handler for the health check endpoint.
///
/// Reports the configured backend without touching the database.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: Backend + 'static,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.backend().name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}

/// Handler for a liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for a readiness probe.
///
/// Runs the backend health check, so a database that cannot be reached
/// reports `503 Service Unavailable`.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: Backend + 'static,
{
    debug!("Processing readiness check request");

    let backend = state.backend();
    match backend.health_check().await {
        Ok(()) => {
            let response = serde_json::json!({
                "status": "ready",
                "backend": backend.name(),
                "checks": {
                    "storage": "ok"
                }
            });
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            let response = serde_json::json!({
                "status": "unavailable",
                "backend": backend.name(),
                "checks": {
                    "storage": e.to_string()
                }
            });
            (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
        }
    }
}
