//! Infrastructure layer - external adapters
//!
//! This layer contains:
//! - Persistence: SQLite adapter for data storage
//! - HTTP: REST API routes
//! - Query: list pagination, sorting and filter parsing
//! - Config: application configuration
//! - State: shared application state

pub mod config;
pub mod http;
pub mod persistence;
pub mod query;
pub mod state;
