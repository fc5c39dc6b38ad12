//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::jobs::Notifier;
use crate::services::{ItemService, ServiceContainer, Services, UserService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// User service (auth, password lifecycle, user management)
    pub user_service: Arc<dyn UserService>,
    /// Item service (ownership-scoped CRUD)
    pub item_service: Arc<dyn ItemService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Process-wide configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_config(
        database: Arc<Database>,
        config: Config,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let container = Services::from_connection(
            database.get_connection(),
            config.clone(),
            notifier,
        );

        Self {
            user_service: container.users(),
            item_service: container.items(),
            database,
            config,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        user_service: Arc<dyn UserService>,
        item_service: Arc<dyn ItemService>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            user_service,
            item_service,
            database,
            config,
        }
    }
}
