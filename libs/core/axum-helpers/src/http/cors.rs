use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::info;

const METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

/// CORS restricted to `origins`, with credentials allowed.
pub fn create_cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(METHODS)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Parse a comma-separated origin list, skipping blanks.
pub fn parse_allowed_origins(raw: &str) -> io::Result<Vec<HeaderValue>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Invalid CORS_ALLOWED_ORIGIN value '{s}': {e}"),
                )
            })
        })
        .collect()
}

/// Builds the CORS layer from `CORS_ALLOWED_ORIGIN`.
///
/// Unset or blank allows any origin (without credentials).
/// Otherwise only the listed origins are allowed.
pub fn cors_layer_from_env() -> io::Result<CorsLayer> {
    let raw = std::env::var("CORS_ALLOWED_ORIGIN").unwrap_or_default();
    let origins = parse_allowed_origins(&raw)?;

    if origins.is_empty() {
        info!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(METHODS)
            .allow_headers(Any)
            .max_age(Duration::from_secs(3600)));
    }

    info!(origins = %raw, "CORS configured with allowed origins");
    Ok(create_cors_layer(origins))
}
