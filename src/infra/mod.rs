//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Database migrations
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{EntityRepository, ItemRepository, UserRepository};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};
