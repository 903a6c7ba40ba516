//! Account handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{RegisterUser, UpdateUser, UserId, UserView};

use crate::api::extractors::ValidatedJson;
use crate::api::state::AppState;

/// Registration request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "alice")]
    pub username: String,
    /// User email address
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email should be valid")
    )]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Plain text password, stored only as a hash
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

impl From<RegisterRequest> for RegisterUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            email: req.email,
            password: req.password,
        }
    }
}

/// Partial update request; omitted fields stay unchanged
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    /// New login name
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    #[schema(example = "alice2")]
    pub username: Option<String>,
    /// New password; an empty string keeps the current one
    #[schema(example = "new-secret")]
    pub password: Option<String>,
    /// Enable or disable the account
    #[schema(example = false)]
    pub enabled: Option<bool>,
    /// Must equal the current email; any other value is rejected
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUser {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            username: req.username,
            password: req.password,
            enabled: req.enabled,
            email: req.email,
        }
    }
}

/// Create account routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/:id", get(get_user).put(update_user))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = UserView),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<UserView>> {
    let user = state.account_service.register(payload.into()).await?;
    Ok(Json(user))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User profile", body = UserView),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> AppResult<Json<UserView>> {
    let user = state.account_service.get_user(id).await?;
    Ok(Json(user))
}

/// Update username, password or enabled flag
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Username taken or email change attempted")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserView>> {
    let user = state.account_service.update_user(id, payload.into()).await?;
    Ok(Json(user))
}
