//! Route table.

use axum::{Router, routing::get};
use dissoc_persistence::core::{Backend, DiagnosticsProvider, DissociationProvider};

use crate::handlers;
use crate::state::AppState;

/// Creates all API routes.
///
/// # Routes
///
/// ## Service
/// - `GET /` - Root page
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe (checks the database)
/// - `GET /img` - Static image
/// - `GET /test_db` - Diagnostics
///
/// ## Queries
/// - `GET /terms/{term}/studies` - Echo the term
/// - `GET /locations/{coords}/studies` - Echo the parsed coordinate
/// - `GET /dissociate/terms/{term_a}/{term_b}` - Term dissociation
/// - `GET /dissociate/locations/{coords_a}/{coords_b}` - Spatial dissociation
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: Backend + DissociationProvider + DiagnosticsProvider + 'static,
{
    Router::new()
        // Service routes
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler::<S>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<S>))
        .route("/img", get(handlers::image_handler::<S>))
        .route("/test_db", get(handlers::diagnostics_handler::<S>))
        // Echo routes
        .route("/terms/{term}/studies", get(handlers::term_studies_handler))
        .route(
            "/locations/{coords}/studies",
            get(handlers::location_studies_handler),
        )
        // Dissociation routes
        .route(
            "/dissociate/terms/{term_a}/{term_b}",
            get(handlers::dissociate_terms_handler::<S>),
        )
        .route(
            "/dissociate/locations/{coords_a}/{coords_b}",
            get(handlers::dissociate_locations_handler::<S>),
        )
        // State
        .with_state(state)
}
