//! JSON body extractor with enveloped rejections.

use crate::errors::{AppError, ErrorCode};
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but rejections render as a 400 `INVALID_REQUEST`
/// error body instead of axum's plain-text rejection.
///
/// An empty body is read as JSON `null`, so `JsonBody<Option<T>>` yields
/// `None` for both a missing and a `null` body. Field validation is left to
/// the service layer.
///
/// ```ignore
/// async fn create_user(JsonBody(input): JsonBody<Option<UserInput>>) -> impl IntoResponse {
///     // ...
/// }
/// ```
pub struct JsonBody<T>(pub T);

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from_code(ErrorCode::InvalidRequest, rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_slice(b"null").map(JsonBody).map_err(|_| {
                AppError::from_code(ErrorCode::InvalidRequest, "Request body is required")
            });
        }

        if !is_json {
            return Err(AppError::from_code(
                ErrorCode::InvalidRequest,
                "Expected request with `Content-Type: application/json`",
            ));
        }

        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(JsonBody(value))
    }
}
