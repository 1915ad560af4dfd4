pub mod codes;
pub mod envelope;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;
pub use envelope::{error_envelope, panic_response};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use thiserror::Error;
use utoipa::ToSchema;

/// Body returned for every failed request.
///
/// ```json
/// {
///   "errorCode": "USER_NOT_FOUND",
///   "message": "User not found with id: 0193...",
///   "details": "The requested user does not exist",
///   "path": "/api/users/0193...",
///   "status": 404,
///   "timestamp": "2025-03-01T12:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error_code: String,
    /// Human-readable message
    pub message: String,
    /// Generic explanation of the error class
    pub details: String,
    /// Path of the request that failed
    pub path: String,
    /// HTTP status code, repeated for clients that only see the body
    pub status: u16,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: &AppError, path: impl Into<String>) -> Self {
        Self {
            error_code: error.code.to_string(),
            message: error.message.clone(),
            details: error.details.clone(),
            path: path.into(),
            status: error.status.as_u16(),
            timestamp: Utc::now(),
        }
    }
}

/// An error that is ready to be rendered at the HTTP boundary.
///
/// Domain crates keep their own error enums and convert into this type,
/// choosing the status, code, and client-safe wording.
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    status: StatusCode,
    code: Cow<'static, str>,
    message: String,
    details: String,
}

impl AppError {
    pub fn new(
        status: StatusCode,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
            details: details.into(),
        }
    }

    /// Error for one of the generic boundary codes, with its default wording as details.
    pub fn from_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(code.status(), code.as_str(), message, code.default_message())
    }

    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message, details)
    }

    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self::new(StatusCode::CONFLICT, code, message, details)
    }

    /// Generic 500; the message never carries internals.
    pub fn internal() -> Self {
        Self::from_code(
            ErrorCode::InternalError,
            ErrorCode::InternalError.default_message(),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::from_code(ErrorCode::InvalidRequest, rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::from_code(ErrorCode::InvalidRequest, rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::from_code(ErrorCode::InvalidRequest, rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                error_code = %self.code,
                status = self.status.as_u16(),
                "{}",
                self.message
            );
        } else {
            tracing::warn!(
                error_code = %self.code,
                status = self.status.as_u16(),
                "{}",
                self.message
            );
        }

        // The path is unknown here; `error_envelope` fills it in from the request.
        let body = ErrorResponse::new(&self, "");
        let mut response = (self.status, Json(&body)).into_response();
        response.extensions_mut().insert(body);
        response
    }
}
