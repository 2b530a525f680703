//! Dissociation server
//!
//! Serves term and spatial dissociation queries over a neuroimaging study
//! database.

use std::sync::Arc;

use clap::Parser;
use dissoc_rest::{ServerConfig, create_app_with_config, init_logging};
use tracing::{info, warn};

#[cfg(feature = "postgres")]
use dissoc_persistence::backends::postgres::{PostgresBackend, PostgresConfig};
#[cfg(feature = "postgres")]
use dissoc_persistence::core::Backend;

/// Creates the PostgreSQL backend from the server configuration.
///
/// The pool connects lazily; this fails only on missing or unusable
/// configuration.
#[cfg(feature = "postgres")]
fn create_postgres_backend(config: &ServerConfig) -> anyhow::Result<PostgresBackend> {
    let backend_config = PostgresConfig::from_url_setting(config.database_url.clone())?
        .with_schema(config.db_schema.clone())
        .with_max_connections(config.db_max_connections)
        .with_statement_timeout_ms(config.statement_timeout_ms);

    Ok(PostgresBackend::new(backend_config)?)
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

/// Starts the Axum HTTP server and waits for a shutdown signal.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(feature = "postgres")]
async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let backend = Arc::new(create_postgres_backend(&config)?);

    if let Err(e) = backend.health_check().await {
        warn!(error = %e, "Database not reachable yet; queries will retry on demand");
    }

    let app = create_app_with_config(Arc::clone(&backend), config.clone());
    let result = serve(app, &config).await;

    backend.close();
    info!("Server stopped");
    result
}

#[cfg(not(feature = "postgres"))]
async fn run(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!("No storage backend compiled in; rebuild with the `postgres` feature")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        schema = %config.db_schema,
        radius = config.proximity_radius,
        term_limit = config.term_limit,
        location_limit = config.location_limit,
        "Starting dissociation server"
    );

    run(config).await
}
