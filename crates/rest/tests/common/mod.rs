//! Common test utilities for REST API testing.
//!
//! - [`memory`] - In-memory backend implementing the provider traits
//! - [`fixtures`] - Seeded studies and server construction

pub mod fixtures;
pub mod memory;
