//! Item service - Handles item-related business logic.
//!
//! SOLID (SRP): Handles item use cases only.
//! DDD: Orchestrates domain operations via Unit of Work.
//!
//! Ownership rule: a caller passes its own user id as `owner_id` to
//! restrict writes to records it owns; passing `None` bypasses the check
//! and is reserved for superuser callers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{CreateItem, Item, NewItem, UpdateItem};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Item service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ItemService: Send + Sync {
    /// Create a new item stamped with the owning user
    async fn create(&self, data: CreateItem, owner_id: i32) -> AppResult<Item>;

    /// Apply a partial update, enforcing ownership when `owner_id` is given
    async fn update(&self, id: i32, patch: UpdateItem, owner_id: Option<i32>) -> AppResult<Item>;

    /// Delete an item and return its pre-deletion snapshot
    async fn delete(&self, id: i32, owner_id: Option<i32>) -> AppResult<Item>;

    /// Point lookup; revealing or rejecting by owner is the caller's call
    async fn get_by_id(&self, id: i32) -> AppResult<Option<Item>>;

    /// Paginated listing across all owners
    async fn get_list(&self, offset: u64, limit: u64) -> AppResult<Vec<Item>>;

    /// Paginated listing restricted to one owner
    async fn get_list_by_owner(
        &self,
        owner_id: i32,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Item>>;
}

/// Concrete implementation of ItemService using Unit of Work.
pub struct ItemManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> ItemManager<U> {
    /// Create new item service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> ItemService for ItemManager<U> {
    async fn create(&self, data: CreateItem, owner_id: i32) -> AppResult<Item> {
        let created = with_transaction!(self.uow, |ctx| {
            ctx.items()
                .insert(NewItem {
                    title: data.title,
                    description: data.description,
                    owner_id,
                })
                .await
        })?;

        tracing::info!(item_id = created.id, owner_id, "item created");
        Ok(created)
    }

    async fn update(&self, id: i32, patch: UpdateItem, owner_id: Option<i32>) -> AppResult<Item> {
        let updated = with_transaction!(self.uow, |ctx| {
            let Some(mut item) = ctx.items().get(id).await? else {
                return Err(AppError::ItemNotFound);
            };

            if let Some(caller) = owner_id {
                if item.owner_id != caller {
                    return Err(AppError::ItemPermission);
                }
            }

            if let Some(title) = patch.title {
                item.title = Some(title);
            }
            if let Some(description) = patch.description {
                item.description = Some(description);
            }

            ctx.items().update(&item).await
        })?;

        tracing::info!(item_id = updated.id, "item updated");
        Ok(updated)
    }

    async fn delete(&self, id: i32, owner_id: Option<i32>) -> AppResult<Item> {
        let deleted = with_transaction!(self.uow, |ctx| {
            let Some(item) = ctx.items().get(id).await? else {
                return Err(AppError::ItemNotFound);
            };

            if let Some(caller) = owner_id {
                if item.owner_id != caller {
                    return Err(AppError::ItemPermission);
                }
            }

            ctx.items().remove(id).await?;

            // Pre-deletion snapshot goes back to the caller
            Ok(item)
        })?;

        tracing::info!(item_id = deleted.id, "item deleted");
        Ok(deleted)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Item>> {
        with_transaction!(self.uow, |ctx| ctx.items().get(id).await)
    }

    async fn get_list(&self, offset: u64, limit: u64) -> AppResult<Vec<Item>> {
        with_transaction!(self.uow, |ctx| ctx.items().list(offset, limit).await)
    }

    async fn get_list_by_owner(
        &self,
        owner_id: i32,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Item>> {
        with_transaction!(self.uow, |ctx| {
            ctx.items().list_by_owner(owner_id, offset, limit).await
        })
    }
}
