//! Unit of Work pattern implementation.
//!
//! SOLID (SRP): Manages transaction lifecycle and repository access.
//! DDD: Coordinates operations across multiple aggregates atomically.
//!
//! The Unit of Work pattern:
//! - Centralizes access to all repositories
//! - Manages database transactions (begin, commit, rollback)
//! - Ensures consistency across multiple repository operations
//!
//! Each `transaction` call is one atomic scope: a fresh session is taken
//! from the pool, repositories are bound to it, and the writes commit
//! exactly when the closure returns `Ok`. Every other exit path — an `Err`
//! return, a panic unwinding through the closure, a dropped future — rolls
//! the transaction back, so at most the committed writes persist. Entities
//! returned out of the closure are plain data; using them after the scope
//! closes never touches the released session.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use super::repositories::{ItemRepository, UserRepository};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the generic method keeps this trait out of `dyn` contexts; the
/// service layer stays generic over its unit of work instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Execute a closure within a transaction.
    ///
    /// Commits when the closure returns `Ok`, rolls back when it returns
    /// `Err`. The isolation level is whatever the store defaults to.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same database transaction. The context borrows the transaction
/// to ensure proper lifetime management.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> UserRepository<'a> {
        UserRepository::new(self.txn)
    }

    /// Get item repository for this transaction
    pub fn items(&self) -> ItemRepository<'a> {
        ItemRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork over a relational store.
///
/// The same implementation backs production (Postgres) and the test
/// double (SQLite in memory); the connection decides.
pub struct Persistence {
    db: DatabaseConnection,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        // Begin transaction on a session from the pool
        let txn = self.db.begin().await.map_err(AppError::from)?;

        // Create context with borrowed transaction
        let ctx = TransactionContext::new(&txn);

        // Execute the closure
        match f(ctx).await {
            Ok(result) => {
                // Commit on success - txn is owned, so this always works
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                // Rollback on error
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Simpler API for executing transactional operations.
///
/// This helper macro reduces boilerplate when using transactions.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
