//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "errorCode": "USER_VALIDATION_ERROR",
        "message": "name: must not be blank",
        "details": "The provided data is not valid",
        "path": "/api/users",
        "status": 400,
        "timestamp": "2025-03-01T12:00:00Z"
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "errorCode": "INVALID_UUID",
        "message": "Invalid UUID: not-a-uuid",
        "details": "Invalid UUID format",
        "path": "/api/users/not-a-uuid",
        "status": 400,
        "timestamp": "2025-03-01T12:00:00Z"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "errorCode": "USER_NOT_FOUND",
        "message": "User not found with id: 01956b3e-7c1a-7d2e-9f00-2b6f0c1d4e5a",
        "details": "The requested user does not exist",
        "path": "/api/users/01956b3e-7c1a-7d2e-9f00-2b6f0c1d4e5a",
        "status": 404,
        "timestamp": "2025-03-01T12:00:00Z"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "errorCode": "USER_ALREADY_EXISTS",
        "message": "User with email 'juan@example.com' already exists",
        "details": "A user with the provided data already exists",
        "path": "/api/users",
        "status": 409,
        "timestamp": "2025-03-01T12:00:00Z"
    })
)]
pub struct ConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable - a downstream dependency failed",
    content_type = "application/json",
    example = json!({
        "errorCode": "ORDER_SERVICE_ERROR",
        "message": "Failed to retrieve order information",
        "details": "The order service is temporarily unavailable",
        "path": "/api/users/01956b3e-7c1a-7d2e-9f00-2b6f0c1d4e5a/orders",
        "status": 503,
        "timestamp": "2025-03-01T12:00:00Z"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "errorCode": "INTERNAL_SERVER_ERROR",
        "message": "An unexpected error occurred",
        "details": "An unexpected error occurred",
        "path": "/api/users",
        "status": 500,
        "timestamp": "2025-03-01T12:00:00Z"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);
