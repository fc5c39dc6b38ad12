//! Init command - First-run data bootstrap.
//!
//! Creates the configured first superuser so a fresh deployment has an
//! account that can manage everything else. Safe to re-run: an existing
//! superuser is reported, not an error.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::CreateUser;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, Persistence};
use crate::jobs::LogNotifier;
use crate::services::{UserManager, UserService};

/// Execute the init command
pub async fn execute(config: Config) -> AppResult<()> {
    tracing::info!("Creating initial data");

    let db = Arc::new(Database::connect(&config).await);
    let uow = Arc::new(Persistence::new(db.get_connection()));
    // Bootstrap runs before any queue exists; never email the superuser
    let service = UserManager::new(uow, config.clone(), Arc::new(LogNotifier));

    let superuser = CreateUser {
        email: config.first_superuser.clone(),
        password: config.first_superuser_password.clone(),
        full_name: None,
        is_active: true,
        is_superuser: true,
    };

    match service.create(superuser).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "superuser created");
        }
        Err(AppError::UserAlreadyExists) => {
            tracing::info!(email = %config.first_superuser, "superuser already exists");
        }
        Err(e) => return Err(e),
    }

    tracing::info!("Initial data created");
    Ok(())
}
