//! Notification sender boundary.
//!
//! Account emails are fire-and-forget: the service layer calls through
//! this trait after its transaction commits, and delivery failures are
//! logged, never surfaced into the request outcome.

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;

use super::email_job::EmailJob;
use crate::config::Config;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Outbound account-notification operations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Welcome email with the initial credentials
    async fn send_account_created(&self, email: &str, username: &str, password: &str);

    /// Password recovery email carrying the reset token
    async fn send_password_reset(&self, email: &str, token: &str);
}

/// Queue-backed notifier: enqueues email jobs on the apalis Postgres
/// queue for the worker process (`jobs work`) to deliver.
pub struct QueueNotifier {
    storage: PostgresStorage<EmailJob>,
    project_name: String,
    server_url: String,
    reset_token_expire_hours: i64,
}

impl QueueNotifier {
    /// Connect to the job queue backing store.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        use apalis_sql::sqlx::postgres::PgPoolOptions;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await
            .map_err(|e| AppError::internal(format!("Failed to connect to job queue: {}", e)))?;

        PostgresStorage::setup(&pool)
            .await
            .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

        Ok(Self {
            storage: PostgresStorage::new(pool),
            project_name: config.project_name.clone(),
            server_url: config.server_url.clone(),
            reset_token_expire_hours: config.reset_token_expire_hours,
        })
    }

    async fn enqueue(&self, job: EmailJob) {
        // Storage::push needs ownership; PostgresStorage clones cheaply
        let mut storage = self.storage.clone();
        if let Err(e) = storage.push(job).await {
            tracing::error!("Failed to enqueue email job: {}", e);
        }
    }
}

#[async_trait]
impl Notifier for QueueNotifier {
    async fn send_account_created(&self, email: &str, username: &str, password: &str) {
        let job = EmailJob::account_created(
            &self.project_name,
            &self.server_url,
            email,
            username,
            password,
        );
        self.enqueue(job).await;
    }

    async fn send_password_reset(&self, email: &str, token: &str) {
        let job = EmailJob::password_reset(
            &self.project_name,
            &self.server_url,
            email,
            email,
            token,
            self.reset_token_expire_hours,
        );
        self.enqueue(job).await;
    }
}

/// Log-only notifier used when email delivery is disabled.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_account_created(&self, email: &str, username: &str, _password: &str) {
        tracing::info!(%email, %username, "account-created email suppressed (emails disabled)");
    }

    async fn send_password_reset(&self, email: &str, _token: &str) {
        tracing::info!(%email, "password-reset email suppressed (emails disabled)");
    }
}
