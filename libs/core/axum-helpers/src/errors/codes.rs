//! Error codes raised by the HTTP plumbing itself.
//!
//! Domain crates define their own codes; these cover rejected requests,
//! unknown routes, and failures nobody else handled.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::InvalidUuid;
//! assert_eq!(code.as_str(), "INVALID_UUID");
//! assert_eq!(code.status().as_u16(), 400);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Body, query string, or path could not be decoded
    InvalidRequest,
    /// Path segment is not a UUID
    InvalidUuid,
    /// No route matched
    NotFound,
    /// Route matched but not the method
    MethodNotAllowed,
    /// Anything unexpected, including panics
    #[serde(rename = "INTERNAL_SERVER_ERROR")]
    InternalError,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::InvalidUuid => "INVALID_UUID",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorCode::InternalError => "INTERNAL_SERVER_ERROR",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidRequest | ErrorCode::InvalidUuid => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn default_message(self) -> &'static str {
        match self {
            ErrorCode::InvalidRequest => "The request could not be processed",
            ErrorCode::InvalidUuid => "Invalid UUID format",
            ErrorCode::NotFound => "The requested resource was not found",
            ErrorCode::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            ErrorCode::InternalError => "An unexpected error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
