//! Dissociation handlers.
//!
//! A dissociation returns the studies matching the first criterion that do
//! not match the second one, as `[{"study_id": ..., "title": ...}]`.

use axum::{Json, extract::State};
use dissoc_persistence::core::{Backend, DissociationProvider};
use dissoc_persistence::types::{SpatialDissociation, StudyRecord, TermDissociation};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::{CoordinatePairPath, TermPairPath};
use crate::state::AppState;

/// Handler for term dissociations.
///
/// Underscores in either segment are read as spaces, so
/// `/dissociate/terms/working_memory/emotion` finds studies annotated with
/// "working memory" and never with "emotion".
///
/// # HTTP Request
///
/// `GET [base]/dissociate/terms/{term_a}/{term_b}`
///
/// # Response
///
/// - `200 OK` - Array of studies (possibly empty)
/// - `503 Service Unavailable` - The database could not be reached
/// - `500 Internal Server Error` - The query failed
pub async fn dissociate_terms_handler<S>(
    State(state): State<AppState<S>>,
    TermPairPath(terms): TermPairPath,
) -> RestResult<Json<Vec<StudyRecord>>>
where
    S: Backend + DissociationProvider + 'static,
{
    debug!(
        include = %terms.include,
        exclude = %terms.exclude,
        "Processing term dissociation request"
    );

    let request = TermDissociation::new(terms).with_limit(state.limits().terms);
    let studies = state.backend().dissociate_terms(&request).await?;

    debug!(count = studies.len(), "Term dissociation complete");
    Ok(Json(studies))
}

/// Handler for spatial dissociations.
///
/// Coordinates are `x_y_z` in MNI millimetres; a study is "near" a point if
/// any of its reported peaks lies within the configured radius.
///
/// # HTTP Request
///
/// `GET [base]/dissociate/locations/{coords_a}/{coords_b}`
///
/// # Response
///
/// - `200 OK` - Array of studies (possibly empty)
/// - `400 Bad Request` - A coordinate segment is malformed
/// - `503 Service Unavailable` - The database could not be reached
/// - `500 Internal Server Error` - The query failed
pub async fn dissociate_locations_handler<S>(
    State(state): State<AppState<S>>,
    CoordinatePairPath(points): CoordinatePairPath,
) -> RestResult<Json<Vec<StudyRecord>>>
where
    S: Backend + DissociationProvider + 'static,
{
    debug!(
        include = %points.include,
        exclude = %points.exclude,
        "Processing spatial dissociation request"
    );

    let request = SpatialDissociation::new(points)
        .with_radius(state.radius())
        .with_limit(state.limits().locations);
    let studies = state.backend().dissociate_locations(&request).await?;

    debug!(count = studies.len(), "Spatial dissociation complete");
    Ok(Json(studies))
}
