use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub checks: BTreeMap<String, &'static str>,
}

/// A boxed readiness probe; `Err` carries a reason for the log.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs all checks concurrently.
///
/// Returns 200 when every check passes and 503 otherwise. Failure reasons
/// are logged, not returned.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![
///     ("database", Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> Response {
    let (names, futures): (Vec<_>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(futures).await;

    let mut all_healthy = true;
    let checks = names
        .into_iter()
        .zip(results)
        .map(|(name, result)| {
            let state = match result {
                Ok(()) => "up",
                Err(reason) => {
                    tracing::error!(check = name, %reason, "Readiness check failed");
                    all_healthy = false;
                    "down"
                }
            };
            (name.to_string(), state)
        })
        .collect();

    let (status, label) = if all_healthy {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not ready")
    };

    (
        status,
        Json(ReadyResponse {
            status: label,
            checks,
        }),
    )
        .into_response()
}

/// Liveness: always 200 while the process serves requests.
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// Router exposing `GET /health`.
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
