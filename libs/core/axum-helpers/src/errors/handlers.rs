use axum::{
    extract::OriginalUri,
    response::{IntoResponse, Response},
};

use super::{AppError, ErrorCode};

/// Fallback for unmatched routes.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> Response {
    AppError::from_code(
        ErrorCode::NotFound,
        format!("No route for {}", uri.path()),
    )
    .into_response()
}

/// Handler for routes that exist under a different method.
pub async fn method_not_allowed() -> Response {
    AppError::from_code(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
    )
    .into_response()
}
