//! Item domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Item domain entity.
///
/// Owned by exactly one user; mutated only by its owner or a superuser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner_id: i32,
}

/// Insert payload for an item row; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub owner_id: i32,
}

/// Item creation data transfer object
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateItem {
    /// Item title
    #[schema(example = "Grocery list")]
    pub title: Option<String>,
    /// Item description
    #[schema(example = "Things to buy on Saturday")]
    pub description: Option<String>,
}

/// Item partial update data transfer object.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateItem {
    #[schema(example = "Grocery list")]
    pub title: Option<String>,
    #[schema(example = "Things to buy on Sunday")]
    pub description: Option<String>,
}

/// Item response returned to clients
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemResponse {
    /// Unique item identifier
    #[schema(example = 1)]
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Identifier of the owning user
    #[schema(example = 1)]
    pub owner_id: i32,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            owner_id: item.owner_id,
        }
    }
}
