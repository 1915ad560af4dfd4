use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::order_client::OrderClientError;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("User with email '{0}' already exists")]
    AlreadyExists(String),

    #[error("User not found with id: {0}")]
    NotFound(Uuid),

    #[error("User not found with email: {0}")]
    EmailNotFound(String),

    #[error("Failed to fetch orders for user {user_id}")]
    OrderService {
        user_id: Uuid,
        #[source]
        source: OrderClientError,
    },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Response class of a [`UserError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    AlreadyExists,
    NotFound,
    OrderService,
    Internal,
}

impl ErrorKind {
    pub const fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::AlreadyExists => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::OrderService => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => "USER_VALIDATION_ERROR",
            ErrorKind::AlreadyExists => "USER_ALREADY_EXISTS",
            ErrorKind::NotFound => "USER_NOT_FOUND",
            ErrorKind::OrderService => "ORDER_SERVICE_ERROR",
            ErrorKind::Internal => "INTERNAL_SERVER_ERROR",
        }
    }

    pub const fn details(self) -> &'static str {
        match self {
            ErrorKind::Validation => "The provided data is not valid",
            ErrorKind::AlreadyExists => "A user with the provided data already exists",
            ErrorKind::NotFound => "The requested user does not exist",
            ErrorKind::OrderService => "The order service is temporarily unavailable",
            ErrorKind::Internal => "An unexpected error occurred",
        }
    }
}

impl UserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserError::Validation(_) | UserError::InvalidField { .. } => ErrorKind::Validation,
            UserError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            UserError::NotFound(_) | UserError::EmailNotFound(_) => ErrorKind::NotFound,
            UserError::OrderService { .. } => ErrorKind::OrderService,
            UserError::Database(_) | UserError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        let kind = err.kind();
        let message = match kind {
            ErrorKind::OrderService => {
                tracing::error!(error = %err, cause = ?std::error::Error::source(&err), "Order service call failed");
                "Failed to retrieve order information".to_string()
            }
            ErrorKind::Internal => {
                tracing::error!(error = %err, "Internal error");
                kind.details().to_string()
            }
            _ => err.to_string(),
        };

        AppError::new(kind.status(), kind.code(), message, kind.details())
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        UserError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_names_the_id() {
        let id = Uuid::now_v7();
        let app: AppError = UserError::NotFound(id).into();

        assert_eq!(app.status(), StatusCode::NOT_FOUND);
        assert_eq!(app.code(), "USER_NOT_FOUND");
        assert!(app.message().contains(&id.to_string()));
        assert_eq!(app.details(), "The requested user does not exist");
    }

    #[test]
    fn test_duplicate_email_is_conflict() {
        let app: AppError = UserError::AlreadyExists("juan@example.com".into()).into();

        assert_eq!(app.status(), StatusCode::CONFLICT);
        assert_eq!(app.code(), "USER_ALREADY_EXISTS");
        assert!(app.message().contains("juan@example.com"));
    }

    #[test]
    fn test_field_errors_are_validation() {
        let err = UserError::InvalidField {
            field: "email".into(),
            reason: "Email is required".into(),
        };
        let app: AppError = err.into();

        assert_eq!(app.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.code(), "USER_VALIDATION_ERROR");
        assert!(app.message().contains("email"));
    }

    #[test]
    fn test_order_service_hides_cause() {
        let err = UserError::OrderService {
            user_id: Uuid::now_v7(),
            source: OrderClientError::Status {
                status: 502,
                url: "http://orders.internal:9000/api/orders/user/1".into(),
            },
        };
        assert!(std::error::Error::source(&err).is_some());

        let app: AppError = err.into();
        assert_eq!(app.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(app.code(), "ORDER_SERVICE_ERROR");
        assert!(!app.message().contains("orders.internal"));
        assert_eq!(app.details(), "The order service is temporarily unavailable");
    }

    #[test]
    fn test_database_errors_are_generic() {
        let app: AppError = UserError::Database("relation \"users\" does not exist".into()).into();

        assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.code(), "INTERNAL_SERVER_ERROR");
        assert!(!app.message().contains("relation"));
    }
}
