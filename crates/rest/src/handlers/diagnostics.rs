//! Diagnostics endpoint handler.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dissoc_persistence::core::{Backend, DiagnosticsProvider};
use serde_json::{Value, json};
use tracing::debug;

use crate::state::AppState;

/// Handler reporting server version, table counts and a few sample rows.
///
/// The body always carries `ok` and `dialect`. On success the report fields
/// are merged in; on failure `error` holds the message and the status is 500.
///
/// # HTTP Request
///
/// `GET [base]/test_db`
pub async fn diagnostics_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: Backend + DiagnosticsProvider + 'static,
{
    debug!("Processing diagnostics request");

    let backend = state.backend();
    let mut payload = json!({
        "ok": false,
        "dialect": backend.dialect(),
    });

    match backend.diagnostics().await {
        Ok(report) => {
            if let (Value::Object(body), Ok(Value::Object(fields))) =
                (&mut payload, serde_json::to_value(&report))
            {
                body.extend(fields);
                body.insert("ok".to_string(), Value::Bool(true));
            }
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Diagnostics failed");
            payload["error"] = Value::String(e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
