//! # Axum Helpers
//!
//! Shared HTTP plumbing for the service binaries.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`errors`]**: the JSON error body every failed request returns
//! - **[`extractors`]**: extractors whose rejections use that error body
//!
//! ```ignore
//! use axum_helpers::{create_production_app, create_router};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let router = create_router::<ApiDoc>(Router::new())?;
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthCheckFuture, HealthResponse, ReadyResponse, ShutdownCoordinator, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

pub use http::{cors_layer_from_env, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, error_envelope, panic_response};

pub use extractors::{JsonBody, UuidPath};
