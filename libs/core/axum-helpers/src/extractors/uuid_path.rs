//! UUID path parameter extractor.

use crate::errors::{AppError, ErrorCode};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

/// Extracts a single UUID path parameter.
///
/// A malformed value is rejected with a 400 `INVALID_UUID` error body.
///
/// ```ignore
/// async fn get_user(UuidPath(id): UuidPath) -> String {
///     format!("User ID: {}", id)
/// }
///
/// let app = Router::new().route("/users/{id}", get(get_user));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;

        Uuid::parse_str(&raw)
            .map(UuidPath)
            .map_err(|_| AppError::from_code(ErrorCode::InvalidUuid, format!("Invalid UUID: {raw}")))
    }
}
