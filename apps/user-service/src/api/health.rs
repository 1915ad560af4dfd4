//! Readiness probe with a real database check.

use crate::state::AppState;
use axum::{extract::State, response::Response};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// `/ready`: pings Postgres when the service is backed by it.
///
/// With the in-memory store there is nothing to check and the service is
/// always ready.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = &state.db {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string())
            }),
        ));
    }

    run_health_checks(checks).await
}
