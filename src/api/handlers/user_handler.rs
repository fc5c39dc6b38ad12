//! User management handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_active, require_superuser, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateUser, UpdateUser, UserResponse};
use crate::errors::{AppError, AppResult};
use crate::types::ListQuery;

/// User creation request (superuser only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub full_name: Option<String>,
    /// Whether the account can authenticate (defaults to true)
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Whether the account has unrestricted access (defaults to false)
    #[serde(default)]
    pub is_superuser: bool,
}

fn default_true() -> bool {
    true
}

/// User update request (superuser only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass456!", min_length = 8)]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Self-service update request; privilege flags are not accepted here
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMeRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass456!", min_length = 8)]
    pub password: Option<String>,
}

/// Create user routes (mounted behind the auth middleware)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/me", get(read_user_me).put(update_user_me))
        .route("/:id", get(read_user_by_id).put(update_user_by_id))
}

/// List users (superuser only)
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "List of users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser only")
    )
)]
pub async fn list_users(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<UserResponse>>> {
    require_superuser(&current)?;

    let users = state
        .user_service
        .get_list(query.skip, query.limit())
        .await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Create a new user (superuser only)
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser only"),
        (status = 409, description = "User already exists")
    )
)]
pub async fn create_user(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_superuser(&current)?;

    let user = state
        .user_service
        .create(CreateUser {
            email: payload.email,
            password: payload.password,
            full_name: payload.full_name,
            is_active: payload.is_active,
            is_superuser: payload.is_superuser,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Get the current user
#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user profile", body = UserResponse),
        (status = 400, description = "Inactive user"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn read_user_me(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    require_active(&current)?;

    Ok(Json(UserResponse::from(current)))
}

/// Update the current user
#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UpdateMeRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Inactive user"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn update_user_me(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateMeRequest>,
) -> AppResult<Json<UserResponse>> {
    require_active(&current)?;

    let user = state
        .user_service
        .update_by_id(
            current.id,
            UpdateUser {
                email: payload.email,
                full_name: payload.full_name,
                password: payload.password,
                is_active: None,
                is_superuser: None,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}

/// Get a user by id (self, or any user for superusers)
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser only for other accounts"),
        (status = 404, description = "User not found")
    )
)]
pub async fn read_user_by_id(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<UserResponse>> {
    require_active(&current)?;

    if current.id == id {
        return Ok(Json(UserResponse::from(current)));
    }

    require_superuser(&current)?;

    let user = state
        .user_service
        .get_by_id(id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(UserResponse::from(user)))
}

/// Update a user by id (superuser only)
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Superuser only"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already taken")
    )
)]
pub async fn update_user_by_id(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    require_superuser(&current)?;

    let user = state
        .user_service
        .update_by_id(
            id,
            UpdateUser {
                email: payload.email,
                full_name: payload.full_name,
                password: payload.password,
                is_active: payload.is_active,
                is_superuser: payload.is_superuser,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(user)))
}
