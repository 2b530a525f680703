//! Server configuration for the dissociation API.
//!
//! Every option can be given as a command line flag or an environment
//! variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DISSOC_SERVER_PORT` | 8080 | Server port |
//! | `DISSOC_SERVER_HOST` | 127.0.0.1 | Host to bind |
//! | `DISSOC_LOG_LEVEL` | info | Log level |
//! | `DISSOC_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `DISSOC_ENABLE_CORS` | true | Enable CORS |
//! | `DISSOC_CORS_ORIGINS` | * | Allowed origins |
//! | `DISSOC_CORS_METHODS` | GET,OPTIONS | Allowed methods |
//! | `DISSOC_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `DB_URL` | (required) | Database connection string |
//! | `DISSOC_DB_SCHEMA` | ns | Schema holding the study tables |
//! | `DISSOC_DB_MAX_CONNECTIONS` | 10 | Connection pool size |
//! | `DISSOC_STATEMENT_TIMEOUT_MS` | 30000 | Per-query statement timeout |
//! | `DISSOC_PROXIMITY_RADIUS` | 8 | Spatial proximity radius (mm) |
//! | `DISSOC_TERM_LIMIT` | 100 | Row cap for term dissociations |
//! | `DISSOC_LOCATION_LIMIT` | 200 | Row cap for spatial dissociations |
//! | `DISSOC_IMAGE_PATH` | amygdala.gif | File served by `GET /img` |
//!
//! # Example
//!
//! ```rust
//! use dissoc_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     host: "0.0.0.0".to_string(),
//!     term_limit: 50,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::path::PathBuf;

use clap::Parser;
use dissoc_persistence::types::{
    DEFAULT_LOCATION_LIMIT, DEFAULT_PROXIMITY_RADIUS, DEFAULT_TERM_LIMIT, DissociationLimits,
    ProximityRadius,
};

/// Server configuration for the dissociation API.
#[derive(Debug, Clone, Parser)]
#[command(name = "dissoc")]
#[command(about = "Study dissociation query server")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "DISSOC_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "DISSOC_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "DISSOC_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "DISSOC_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "DISSOC_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(long, env = "DISSOC_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "DISSOC_CORS_METHODS", default_value = "GET,OPTIONS")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(long, env = "DISSOC_CORS_HEADERS", default_value = "Content-Type,Accept")]
    pub cors_headers: String,

    /// Database connection string.
    #[arg(long, env = "DB_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Schema holding the study tables.
    #[arg(long, env = "DISSOC_DB_SCHEMA", default_value = "ns")]
    pub db_schema: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DISSOC_DB_MAX_CONNECTIONS", default_value = "10")]
    pub db_max_connections: usize,

    /// Statement timeout for each query, in milliseconds.
    #[arg(long, env = "DISSOC_STATEMENT_TIMEOUT_MS", default_value = "30000")]
    pub statement_timeout_ms: u64,

    /// Distance (mm) within which a reported peak counts as near a query point.
    #[arg(long, env = "DISSOC_PROXIMITY_RADIUS", default_value = "8")]
    pub proximity_radius: f64,

    /// Maximum number of studies returned by a term dissociation.
    #[arg(long, env = "DISSOC_TERM_LIMIT", default_value = "100")]
    pub term_limit: u32,

    /// Maximum number of studies returned by a spatial dissociation.
    #[arg(long, env = "DISSOC_LOCATION_LIMIT", default_value = "200")]
    pub location_limit: u32,

    /// Image served by `GET /img`.
    #[arg(long, env = "DISSOC_IMAGE_PATH", default_value = "amygdala.gif")]
    pub image_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,OPTIONS".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            database_url: None,
            db_schema: "ns".to_string(),
            db_max_connections: 10,
            statement_timeout_ms: 30000,
            proximity_radius: DEFAULT_PROXIMITY_RADIUS,
            term_limit: DEFAULT_TERM_LIMIT,
            location_limit: DEFAULT_LOCATION_LIMIT,
            image_path: PathBuf::from("amygdala.gif"),
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Result caps for the dissociation queries.
    pub fn limits(&self) -> DissociationLimits {
        DissociationLimits {
            terms: self.term_limit,
            locations: self.location_limit,
        }
    }

    /// The spatial proximity radius. Invalid values are reported by
    /// [`validate`](Self::validate); here they fall back to the default.
    pub fn radius(&self) -> ProximityRadius {
        ProximityRadius::new(self.proximity_radius).unwrap_or_default()
    }

    /// Validates the configuration and returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.db_max_connections == 0 {
            errors.push("Database pool size cannot be 0".to_string());
        }

        if self.statement_timeout_ms == 0 {
            errors.push("Statement timeout cannot be 0".to_string());
        }

        if let Err(e) = ProximityRadius::new(self.proximity_radius) {
            errors.push(format!("Proximity radius: {}", e));
        }

        if let Err(e) = self.limits().validate() {
            errors.push(format!("Result limits: {}", e));
        }

        if self.db_schema.trim().is_empty() {
            errors.push("Database schema cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// Uses ephemeral port 0, a short timeout and no CORS.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            ..Default::default()
        }
    }
}
