//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.
//! DDD: Orchestrates domain operations via Unit of Work.
//!
//! Every operation runs in its own fresh transaction; entities returned
//! to the caller are plain data detached from any session.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::domain::{CreateUser, NewUser, Password, UpdateUser, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::jobs::Notifier;
use crate::services::tokens;
use crate::with_transaction;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user; the email must not be taken
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    /// Check credentials and return the user, or nothing on any mismatch
    async fn authenticate(&self, email: String, password: String) -> AppResult<Option<User>>;

    /// Check credentials and issue an access token
    async fn generate_auth_token(&self, email: String, password: String) -> AppResult<String>;

    /// Issue a reset token and dispatch a recovery email; persists nothing
    async fn recover_password(&self, email: String) -> AppResult<()>;

    /// Set a new password for the account named by a valid reset token
    async fn reset_password(&self, token: String, new_password: String) -> AppResult<()>;

    /// Apply a partial update; a present password is re-hashed
    async fn update_by_id(&self, id: i32, patch: UpdateUser) -> AppResult<User>;

    /// Point lookup, no extra rules
    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Paginated listing, no extra rules
    async fn get_list(&self, offset: u64, limit: u64) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
    notifier: Arc<dyn Notifier>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>, config: Config, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            uow,
            config,
            notifier,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn create(&self, data: CreateUser) -> AppResult<User> {
        let hashed_password = Password::new(&data.password)?.into_string();
        let CreateUser {
            email,
            password,
            full_name,
            is_active,
            is_superuser,
        } = data;

        let created = with_transaction!(self.uow, |ctx| {
            if ctx.users().get_by_email(&email).await?.is_some() {
                return Err(AppError::UserAlreadyExists);
            }

            // A concurrent create can still win the email; the store's
            // unique constraint is the arbiter.
            ctx.users()
                .insert(NewUser {
                    full_name,
                    email,
                    hashed_password,
                    is_active,
                    is_superuser,
                })
                .await
                .map_err(|e| {
                    if e.is_unique_violation() {
                        AppError::UserAlreadyExists
                    } else {
                        e
                    }
                })
        })?;

        tracing::info!(user_id = created.id, "user created");

        if self.config.emails_enabled {
            self.notifier
                .send_account_created(&created.email, &created.email, &password)
                .await;
        }

        Ok(created)
    }

    async fn authenticate(&self, email: String, password: String) -> AppResult<Option<User>> {
        with_transaction!(self.uow, |ctx| {
            let Some(user) = ctx.users().get_by_email(&email).await? else {
                return Ok(None);
            };

            if !Password::from_hash(user.hashed_password.clone()).verify(&password) {
                return Ok(None);
            }

            Ok(Some(user))
        })
    }

    async fn generate_auth_token(&self, email: String, password: String) -> AppResult<String> {
        let user = with_transaction!(self.uow, |ctx| {
            let Some(user) = ctx.users().get_by_email(&email).await? else {
                return Err(AppError::UserNotFound);
            };

            if !user.is_active {
                return Err(AppError::UserInactive);
            }

            // Same error kind as an unknown email, so callers cannot
            // probe which factor failed
            if !Password::from_hash(user.hashed_password.clone()).verify(&password) {
                return Err(AppError::UserNotFound);
            }

            Ok(user)
        })?;

        tokens::issue_access_token(user.id, &self.config)
    }

    async fn recover_password(&self, email: String) -> AppResult<()> {
        let user = with_transaction!(self.uow, |ctx| {
            ctx.users()
                .get_by_email(&email)
                .await?
                .ok_or(AppError::UserNotFound)
        })?;

        let reset_token = tokens::issue_reset_token(&user.email, &self.config)?;
        self.notifier
            .send_password_reset(&user.email, &reset_token)
            .await;

        tracing::info!(user_id = user.id, "password recovery email dispatched");
        Ok(())
    }

    async fn reset_password(&self, token: String, new_password: String) -> AppResult<()> {
        let email =
            tokens::verify_reset_token(&token, &self.config).ok_or(AppError::InvalidToken)?;
        let hashed_password = Password::new(&new_password)?.into_string();

        let updated = with_transaction!(self.uow, |ctx| {
            let Some(mut user) = ctx.users().get_by_email(&email).await? else {
                return Err(AppError::UserNotFound);
            };

            if !user.is_active {
                return Err(AppError::UserInactive);
            }

            user.hashed_password = hashed_password;
            ctx.users().update(&user).await
        })?;

        tracing::info!(user_id = updated.id, "password reset");
        Ok(())
    }

    async fn update_by_id(&self, id: i32, mut patch: UpdateUser) -> AppResult<User> {
        // Hash outside the transaction; the plaintext never reaches the store
        let hashed_password = match patch.password.take() {
            Some(password) => Some(Password::new(&password)?.into_string()),
            None => None,
        };

        let updated = with_transaction!(self.uow, |ctx| {
            let Some(mut user) = ctx.users().get(id).await? else {
                return Err(AppError::UserNotFound);
            };

            if let Some(email) = patch.email {
                user.email = email;
            }
            if let Some(full_name) = patch.full_name {
                user.full_name = Some(full_name);
            }
            if let Some(hashed) = hashed_password {
                user.hashed_password = hashed;
            }
            if let Some(is_active) = patch.is_active {
                user.is_active = is_active;
            }
            if let Some(is_superuser) = patch.is_superuser {
                user.is_superuser = is_superuser;
            }

            ctx.users().update(&user).await.map_err(|e| {
                if e.is_unique_violation() {
                    AppError::UserAlreadyExists
                } else {
                    e
                }
            })
        })?;

        tracing::info!(user_id = updated.id, "user updated");
        Ok(updated)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<User>> {
        with_transaction!(self.uow, |ctx| ctx.users().get(id).await)
    }

    async fn get_list(&self, offset: u64, limit: u64) -> AppResult<Vec<User>> {
        with_transaction!(self.uow, |ctx| ctx.users().list(offset, limit).await)
    }
}
