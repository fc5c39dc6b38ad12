//! Base repository trait following Interface Segregation Principle (ISP).
//!
//! Provides the CRUD operations every entity repository shares: point
//! lookup by identity, pagination in stable ascending-identity order, and
//! idempotent delete. Concrete repositories pick their connection type via
//! the associated `Conn`, so the same code serves any transactional scope.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, EntityTrait, FromQueryResult, Iterable, PrimaryKeyToColumn, PrimaryKeyTrait,
    QueryOrder, QuerySelect,
};
use std::fmt::Debug;

use crate::errors::AppResult;

/// Shared CRUD operations, generic over the SeaORM entity.
#[async_trait]
pub trait EntityRepository<E, M>: Send + Sync
where
    E: EntityTrait<Model = M>,
    E::PrimaryKey: PrimaryKeyToColumn<Column = E::Column> + Iterable,
    M: Send + Sync + FromQueryResult,
{
    /// Connection the repository operates on (plain or transactional)
    type Conn: ConnectionTrait + Send + Sync;

    /// Get connection reference
    fn conn(&self) -> &Self::Conn;

    /// Find entity by primary key; no side effect
    async fn find_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> AppResult<Option<M>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        E::find_by_id(id).one(self.conn()).await.map_err(Into::into)
    }

    /// Fetch one page of entities ordered by ascending primary key
    async fn page(&self, offset: u64, limit: u64) -> AppResult<Vec<M>> {
        let mut query = E::find();
        for key in <E::PrimaryKey as Iterable>::iter() {
            query = query.order_by_asc(key.into_column());
        }
        query
            .offset(offset)
            .limit(limit)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    /// Delete entity by primary key; absent rows are not an error
    async fn delete_by_id(&self, id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType) -> AppResult<()>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Debug,
    {
        E::delete_by_id(id).exec(self.conn()).await?;
        Ok(())
    }
}
