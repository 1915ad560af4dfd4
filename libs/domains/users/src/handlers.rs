use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AppError, JsonBody, UuidPath,
    errors::handlers::method_not_allowed,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
    },
    error_envelope,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{OrderSummary, SearchParams, User, UserInput};
use crate::order_client::OrderClient;
use crate::repository::UserRepository;
use crate::service::UserService;

const TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        search_users,
        total_users,
        get_user_by_email,
        get_user,
        update_user,
        delete_user,
        get_user_orders,
    ),
    components(
        schemas(User, UserInput, OrderSummary),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

type SharedService<R, O> = State<Arc<UserService<R, O>>>;

/// Create the users router with all HTTP endpoints
pub fn router<R, O>(service: UserService<R, O>) -> Router
where
    R: UserRepository + 'static,
    O: OrderClient + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/search", get(search_users))
        .route("/stats/total", get(total_users))
        .route("/email/{email}", get(get_user_by_email))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .route("/{id}/orders", get(get_user_orders))
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(shared_service)
        .layer(middleware::from_fn(error_envelope))
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All users", body = Vec<User>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
) -> UserResult<Json<Vec<User>>> {
    Ok(Json(service.list_users().await?))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = UserInput,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
    JsonBody(input): JsonBody<Option<UserInput>>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Search users whose name contains the given text
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Matching users, possibly none", body = Vec<User>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_users<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<User>>, AppError> {
    let Query(params) = params?;
    let users = service.search_users_by_name(params.name.as_deref()).await?;
    Ok(Json(users))
}

/// Total number of users
#[utoipa::path(
    get,
    path = "/stats/total",
    tag = TAG,
    responses(
        (status = 200, description = "User count", body = u64, example = 42),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn total_users<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
) -> UserResult<Json<u64>> {
    Ok(Json(service.total_users().await?))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/email/{email}",
    tag = TAG,
    params(("email" = String, Path, description = "Exact email address")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_by_email<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
    email: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, AppError> {
    let Path(email) = email?;
    Ok(Json(service.get_user_by_email(&email).await?))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<User>> {
    Ok(Json(service.get_user(id).await?))
}

/// Replace a user's name and email
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UserInput,
    responses(
        (status = 200, description = "User updated", body = User),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
    UuidPath(id): UuidPath,
    JsonBody(input): JsonBody<Option<UserInput>>,
) -> UserResult<Json<User>> {
    Ok(Json(service.update_user(id, input).await?))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
    UuidPath(id): UuidPath,
) -> UserResult<StatusCode> {
    service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Orders of a user, fetched from the order service
#[utoipa::path(
    get,
    path = "/{id}/orders",
    tag = TAG,
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Orders of the user, possibly none", body = Vec<OrderSummary>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user_orders<R: UserRepository, O: OrderClient>(
    State(service): SharedService<R, O>,
    UuidPath(id): UuidPath,
) -> UserResult<Json<Vec<OrderSummary>>> {
    Ok(Json(service.get_user_orders(id).await?))
}
