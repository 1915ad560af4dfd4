use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "User Service API",
        version = "0.1.0",
        description = "Manage users and look up their orders in the order service"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::ApiDoc)
    )
)]
pub struct ApiDoc;
