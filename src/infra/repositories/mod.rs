//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.
//! Every repository is bound to the transaction of the unit of work that
//! created it; only the unit of work commits.

mod base;
pub(crate) mod entities;
mod item_repository;
mod user_repository;

pub use base::EntityRepository;
pub use item_repository::ItemRepository;
pub use user_repository::UserRepository;
