//! Transaction-bound user repository.
//!
//! All operations execute within the transaction handed out by the owning
//! unit of work; nothing here commits. The store reports each write back as
//! the persisted row, so assigned identities and defaulted columns are
//! visible to the caller immediately.

use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ActiveValue::Unchanged, ColumnTrait, DatabaseTransaction,
    EntityTrait, QueryFilter,
};

use super::base::EntityRepository;
use super::entities::user::{self, Entity as UserEntity};
use crate::domain::{NewUser, User};
use crate::errors::AppResult;

pub struct UserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> EntityRepository<UserEntity, user::Model> for UserRepository<'a> {
    type Conn = DatabaseTransaction;

    fn conn(&self) -> &DatabaseTransaction {
        self.txn
    }
}

impl<'a> UserRepository<'a> {
    pub(crate) fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Point lookup by identity
    pub async fn get(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.find_by_id(id).await?.map(User::from))
    }

    /// Lookup by the unique login identifier
    pub async fn get_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.txn)
            .await?;

        Ok(model.map(User::from))
    }

    /// Paginated listing in ascending identity order
    pub async fn list(&self, offset: u64, limit: u64) -> AppResult<Vec<User>> {
        Ok(self
            .page(offset, limit)
            .await?
            .into_iter()
            .map(User::from)
            .collect())
    }

    /// Insert a new row; the returned user carries the store-assigned id
    pub async fn insert(&self, new: NewUser) -> AppResult<User> {
        let active = user::ActiveModel {
            full_name: Set(new.full_name),
            email: Set(new.email),
            hashed_password: Set(new.hashed_password),
            is_active: Set(new.is_active),
            is_superuser: Set(new.is_superuser),
            ..Default::default()
        };

        let model = active.insert(self.txn).await?;
        Ok(User::from(model))
    }

    /// Write every mutable field of an existing row
    pub async fn update(&self, updated: &User) -> AppResult<User> {
        let active = user::ActiveModel {
            id: Unchanged(updated.id),
            full_name: Set(updated.full_name.clone()),
            email: Set(updated.email.clone()),
            hashed_password: Set(updated.hashed_password.clone()),
            is_active: Set(updated.is_active),
            is_superuser: Set(updated.is_superuser),
        };

        let model = active.update(self.txn).await?;
        Ok(User::from(model))
    }

    /// Delete by identity; absent rows are not an error
    pub async fn remove(&self, id: i32) -> AppResult<()> {
        self.delete_by_id(id).await
    }
}
