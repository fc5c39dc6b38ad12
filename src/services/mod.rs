//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use the Unit of Work pattern: every call opens a fresh
//! transaction, and only the Unit of Work commits.

pub mod container;
mod item_service;
pub mod tokens;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use item_service::{ItemManager, ItemService};
pub use tokens::{Claims, TokenResponse};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
#[cfg(any(test, feature = "test-utils"))]
pub use item_service::MockItemService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
