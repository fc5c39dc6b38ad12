//! Authentication and password lifecycle handlers.

use axum::{
    extract::{Extension, Path, State},
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// User email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// Password reset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    /// Reset token from the recovery email
    pub token: String,
    /// New password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "NewSecurePass456!", min_length = 8)]
    pub new_password: String,
}

/// Public login and password recovery routes
pub fn login_routes() -> Router<AppState> {
    Router::new()
        .route("/login/access-token", post(login_access_token))
        .route("/password-recovery/:email", post(recover_password))
        .route("/reset-password", post(reset_password))
}

/// Token check routes (mounted behind the auth middleware)
pub fn token_routes() -> Router<AppState> {
    Router::new().route("/login/test-token", post(test_token))
}

/// Login and get an access token
#[utoipa::path(
    post,
    path = "/api/v1/login/access-token",
    tag = "Login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Incorrect email or password, or inactive user")
    )
)]
pub async fn login_access_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .user_service
        .generate_auth_token(payload.email, payload.password)
        .await
        .map_err(|e| match e {
            // One uniform answer for unknown email and wrong password
            AppError::UserNotFound => AppError::BadRequest("Incorrect email or password".to_string()),
            other => other,
        })?;

    Ok(Json(TokenResponse::bearer(token)))
}

/// Test an access token
#[utoipa::path(
    post,
    path = "/api/v1/login/test-token",
    tag = "Login",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = UserResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn test_token(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    Ok(Json(UserResponse::from(user)))
}

/// Request a password recovery email
#[utoipa::path(
    post,
    path = "/api/v1/password-recovery/{email}",
    tag = "Login",
    params(("email" = String, Path, description = "Account email address")),
    responses(
        (status = 200, description = "Recovery email sent", body = MessageResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn recover_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.user_service.recover_password(email).await?;

    Ok(Json(MessageResponse::new("Password recovery email sent")))
}

/// Reset the password with a recovery token
#[utoipa::path(
    post,
    path = "/api/v1/reset-password",
    tag = "Login",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = MessageResponse),
        (status = 400, description = "Invalid token or inactive user"),
        (status = 404, description = "User not found")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .user_service
        .reset_password(payload.token, payload.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
