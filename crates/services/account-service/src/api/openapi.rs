//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::api::handlers::user_handler::{RegisterRequest, UpdateUserRequest};
use domain::UserView;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Service",
        description = "User registration, lookup and update",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        crate::api::handlers::user_handler::register_user,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::update_user,
    ),
    components(
        schemas(
            RegisterRequest,
            UpdateUserRequest,
            UserView,
        )
    ),
    tags(
        (name = "Users", description = "Account management endpoints"),
    )
)]
pub struct ApiDoc;
