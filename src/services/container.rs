//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{ItemManager, ItemService, UserManager, UserService};
use crate::config::Config;
use crate::infra::Persistence;
use crate::jobs::Notifier;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get item service
    fn items(&self) -> Arc<dyn ItemService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    item_service: Arc<dyn ItemService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(user_service: Arc<dyn UserService>, item_service: Arc<dyn ItemService>) -> Self {
        Self {
            user_service,
            item_service,
        }
    }

    /// Create service container from database connection and config.
    ///
    /// Every service shares one Unit of Work bound to the pooled
    /// connection; each service call still gets its own transaction.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));
        let user_service = Arc::new(UserManager::new(uow.clone(), config, notifier));
        let item_service = Arc::new(ItemManager::new(uow));

        Self {
            user_service,
            item_service,
        }
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn items(&self) -> Arc<dyn ItemService> {
        self.item_service.clone()
    }
}
