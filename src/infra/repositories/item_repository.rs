//! Transaction-bound item repository.
//!
//! Same contract as the user repository, plus an owner-filtered listing
//! used for non-superuser views.

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::base::EntityRepository;
use super::entities::item::{self, Entity as ItemEntity};
use crate::domain::{Item, NewItem};
use crate::errors::AppResult;

pub struct ItemRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> EntityRepository<ItemEntity, item::Model> for ItemRepository<'a> {
    type Conn = DatabaseTransaction;

    fn conn(&self) -> &DatabaseTransaction {
        self.txn
    }
}

impl<'a> ItemRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Point lookup by identity
    pub async fn get(&self, id: i32) -> AppResult<Option<Item>> {
        Ok(self.find_by_id(id).await?.map(Item::from))
    }

    /// Paginated listing in ascending identity order
    pub async fn list(&self, offset: u64, limit: u64) -> AppResult<Vec<Item>> {
        Ok(self
            .page(offset, limit)
            .await?
            .into_iter()
            .map(Item::from)
            .collect())
    }

    /// Paginated listing restricted to one owner
    pub async fn list_by_owner(
        &self,
        owner_id: i32,
        offset: u64,
        limit: u64,
    ) -> AppResult<Vec<Item>> {
        let models = ItemEntity::find()
            .filter(item::Column::OwnerId.eq(owner_id))
            .order_by_asc(item::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(self.txn)
            .await?;

        Ok(models.into_iter().map(Item::from).collect())
    }

    /// Insert a new row; the returned item carries the store-assigned id
    pub async fn insert(&self, new: NewItem) -> AppResult<Item> {
        let active = item::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            owner_id: Set(new.owner_id),
            ..Default::default()
        };

        let model = active.insert(self.txn).await?;
        Ok(Item::from(model))
    }

    /// Write every mutable field of an existing row
    pub async fn update(&self, updated: &Item) -> AppResult<Item> {
        let active = item::ActiveModel {
            id: Unchanged(updated.id),
            title: Set(updated.title.clone()),
            description: Set(updated.description.clone()),
            owner_id: Set(updated.owner_id),
        };

        let model = active.update(self.txn).await?;
        Ok(Item::from(model))
    }

    /// Delete by identity; absent rows are not an error
    pub async fn remove(&self, id: i32) -> AppResult<()> {
        self.delete_by_id(id).await
    }
}
