use std::any::Any;

use axum::{
    Json,
    extract::{OriginalUri, Request},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AppError, ErrorResponse};

/// Fills `path` into error bodies produced by [`AppError`].
///
/// Reads [`OriginalUri`] so routers nested under a prefix still report the
/// full request path. Responses without an error body pass through untouched.
pub async fn error_envelope(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map_or_else(|| request.uri().path().to_owned(), |uri| uri.path().to_owned());

    let mut response = next.run(request).await;
    let Some(mut body) = response.extensions_mut().remove::<ErrorResponse>() else {
        return response;
    };
    body.path = path;

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    (parts, Json(body)).into_response()
}

/// Response used by `CatchPanicLayer`: a generic 500 with no panic details.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned());

    tracing::error!(panic = %detail, "Request handler panicked");
    AppError::internal().into_response()
}
