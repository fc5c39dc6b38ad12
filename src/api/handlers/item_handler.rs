//! Item handlers.
//!
//! The boundary decides how item ownership is enforced: superusers pass
//! `owner_id = None` to the service and see every record, everyone else
//! passes their own id and is confined to it.

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
use crate::api::middleware::{require_active, CurrentUser};
use crate::api::AppState;
use crate::domain::{CreateItem, ItemResponse, UpdateItem};
use crate::errors::{AppError, AppResult};
use crate::types::ListQuery;

/// Item creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateItemRequest {
    /// Item title
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    #[schema(example = "Grocery list")]
    pub title: Option<String>,
    /// Item description
    #[schema(example = "Things to buy on Saturday")]
    pub description: Option<String>,
}

/// Item update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    #[schema(example = "Grocery list")]
    pub title: Option<String>,
    #[schema(example = "Things to buy on Sunday")]
    pub description: Option<String>,
}

/// Create item routes (mounted behind the auth middleware)
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(read_items).post(create_item))
        .route("/:id", get(read_item).put(update_item).delete(delete_item))
}

/// List items: all of them for superusers, own items otherwise
#[utoipa::path(
    get,
    path = "/api/v1/items",
    tag = "Items",
    security(("bearer_auth" = [])),
    params(ListQuery),
    responses(
        (status = 200, description = "List of items", body = Vec<ItemResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn read_items(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ItemResponse>>> {
    require_active(&current)?;

    let items = if current.is_superuser {
        state
            .item_service
            .get_list(query.skip, query.limit())
            .await?
    } else {
        state
            .item_service
            .get_list_by_owner(current.id, query.skip, query.limit())
            .await?
    };

    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// Create a new item owned by the current user
#[utoipa::path(
    post,
    path = "/api/v1/items",
    tag = "Items",
    security(("bearer_auth" = [])),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create_item(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateItemRequest>,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    require_active(&current)?;

    let item = state
        .item_service
        .create(
            CreateItem {
                title: payload.title,
                description: payload.description,
            },
            current.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// Get an item by id
#[utoipa::path(
    get,
    path = "/api/v1/items/{id}",
    tag = "Items",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Item", body = ItemResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn read_item(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ItemResponse>> {
    require_active(&current)?;

    let item = state
        .item_service
        .get_by_id(id)
        .await?
        .ok_or(AppError::ItemNotFound)?;

    if !current.is_superuser && item.owner_id != current.id {
        return Err(AppError::ItemPermission);
    }

    Ok(Json(ItemResponse::from(item)))
}

/// Update an item
#[utoipa::path(
    put,
    path = "/api/v1/items/{id}",
    tag = "Items",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Item ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn update_item(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateItemRequest>,
) -> AppResult<Json<ItemResponse>> {
    require_active(&current)?;

    let owner_id = if current.is_superuser {
        None
    } else {
        Some(current.id)
    };

    let item = state
        .item_service
        .update(
            id,
            UpdateItem {
                title: payload.title,
                description: payload.description,
            },
            owner_id,
        )
        .await?;

    Ok(Json(ItemResponse::from(item)))
}

/// Delete an item; responds with the deleted record
#[utoipa::path(
    delete,
    path = "/api/v1/items/{id}",
    tag = "Items",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Deleted item", body = ItemResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Item not found")
    )
)]
pub async fn delete_item(
    Extension(CurrentUser(current)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ItemResponse>> {
    require_active(&current)?;

    let owner_id = if current.is_superuser {
        None
    } else {
        Some(current.id)
    };

    let item = state.item_service.delete(id, owner_id).await?;

    Ok(Json(ItemResponse::from(item)))
}
