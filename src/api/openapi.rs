//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::handlers::auth_handler::{LoginRequest, ResetPasswordRequest};
use crate::api::handlers::item_handler::{CreateItemRequest, UpdateItemRequest};
use crate::api::handlers::user_handler::{CreateUserRequest, UpdateMeRequest, UpdateUserRequest};
use crate::domain::{ItemResponse, UserResponse};
use crate::services::TokenResponse;
use crate::types::MessageResponse;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::auth_handler::login_access_token,
        crate::api::handlers::auth_handler::test_token,
        crate::api::handlers::auth_handler::recover_password,
        crate::api::handlers::auth_handler::reset_password,
        crate::api::handlers::user_handler::list_users,
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::read_user_me,
        crate::api::handlers::user_handler::update_user_me,
        crate::api::handlers::user_handler::read_user_by_id,
        crate::api::handlers::user_handler::update_user_by_id,
        crate::api::handlers::item_handler::read_items,
        crate::api::handlers::item_handler::create_item,
        crate::api::handlers::item_handler::read_item,
        crate::api::handlers::item_handler::update_item,
        crate::api::handlers::item_handler::delete_item,
    ),
    components(
        schemas(
            LoginRequest,
            ResetPasswordRequest,
            CreateUserRequest,
            UpdateUserRequest,
            UpdateMeRequest,
            CreateItemRequest,
            UpdateItemRequest,
            TokenResponse,
            UserResponse,
            ItemResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Login", description = "Authentication and password recovery"),
        (name = "Users", description = "User management endpoints"),
        (name = "Items", description = "Item management endpoints"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
