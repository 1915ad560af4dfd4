//! Application state shared by the router builders and the readiness probe.

use database::postgres::DatabaseConnection;

/// Cloned into each router that needs it; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL pool, absent when users are kept in memory
    pub db: Option<DatabaseConnection>,
}
