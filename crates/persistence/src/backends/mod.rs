//! Backend implementations.
//!
//! | Backend | Feature | Description |
//! |---------|---------|-------------|
//! | PostgreSQL | `postgres` | PostGIS geometry and full-text search over the study schema |

#[cfg(feature = "postgres")]
pub mod postgres;
