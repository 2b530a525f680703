//! # dissoc-rest - HTTP API for study dissociation queries
//!
//! Exposes the dissociation engine over HTTP. A dissociation returns the
//! studies that match one criterion and not a second one:
//!
//! - by term: studies annotated with `term_a` but never with `term_b`
//! - by location: studies reporting a peak near `coords_a` but none near `coords_b`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use dissoc_rest::{create_app_with_config, ServerConfig};
//! use dissoc_persistence::backends::postgres::{PostgresBackend, PostgresConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::default();
//!     let backend_config = PostgresConfig::from_url_setting(config.database_url.clone())?;
//!     let backend = Arc::new(PostgresBackend::new(backend_config)?);
//!
//!     let app = create_app_with_config(backend, config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Response |
//! |----------|----------|
//! | `GET /` | HTML health page |
//! | `GET /health` | JSON health status |
//! | `GET /_liveness`, `GET /_readiness` | Probes |
//! | `GET /img` | Configured image as `image/gif` |
//! | `GET /terms/{term}/studies` | The term, echoed |
//! | `GET /locations/{x_y_z}/studies` | `[x, y, z]` |
//! | `GET /dissociate/terms/{term_a}/{term_b}` | `[{study_id, title}]` |
//! | `GET /dissociate/locations/{x_y_z}/{x_y_z}` | `[{study_id, title}]` |
//! | `GET /test_db` | Counts and samples of the study tables |
//!
//! Term segments use `_` for spaces (`working_memory`). Coordinate segments
//! are three `_`-separated numbers (`-22_-4_-18`).
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": <kind>, "message": <text>}`:
//!
//! | HTTP Status | Kind |
//! |-------------|------|
//! | 400 | malformed_input, invalid_parameter |
//! | 404 | not_found |
//! | 500 | configuration_missing, query_failure, internal |
//! | 503 | connection_failure |
//! | 504 | cancelled |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and JSON error bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (backend, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`extractors`] - Path extractors for terms and coordinates
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{RestError, RestResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use dissoc_persistence::core::{Backend, DiagnosticsProvider, DissociationProvider};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with default configuration.
///
/// For more control, use [`create_app_with_config`].
pub fn create_app<S>(backend: Arc<S>) -> Router
where
    S: Backend + DissociationProvider + DiagnosticsProvider + 'static,
{
    create_app_with_config(backend, ServerConfig::default())
}

/// Creates the Axum application with custom configuration.
///
/// The backend is shared rather than owned so the caller can close it after
/// the server has shut down.
///
/// # Arguments
///
/// * `backend` - The storage backend
/// * `config` - Server configuration
pub fn create_app_with_config<S>(backend: Arc<S>, config: ServerConfig) -> Router
where
    S: Backend + DissociationProvider + DiagnosticsProvider + 'static,
{
    info!(backend = backend.name(), "Creating dissociation API");

    // Create application state
    let state = AppState::new(backend, config.clone());

    // Build the router with all routes
    let router = routing::create_routes(state);

    // Dropping the handler future on timeout also drops any in-flight query.
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::GATEWAY_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<_> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<_> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this more
/// than once is a no-op.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "dissoc_rest={level},dissoc_persistence={level},dissoc={level},tower_http=debug"
        ))
    });

    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();
}
