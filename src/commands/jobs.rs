//! Jobs command - Background job worker.
//!
//! Starts the worker process that delivers queued emails.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -- jobs work
//! ```

use crate::cli::{JobsAction, JobsArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};

/// Execute the jobs command
pub async fn execute(args: JobsArgs, config: Config) -> AppResult<()> {
    match args.action {
        JobsAction::Work => run_worker(&config).await,
    }
}

/// Start the background job worker
///
/// Connects to the database and starts processing jobs from the queue.
/// Uses apalis with PostgreSQL storage for job persistence.
async fn run_worker(config: &Config) -> AppResult<()> {
    use apalis::prelude::*;
    use apalis_sql::postgres::PostgresStorage;
    use apalis_sql::sqlx::postgres::PgPoolOptions;

    use crate::jobs::{email_job_handler, EmailJob};

    tracing::info!("Connecting to database for job worker...");

    // Create connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::internal(format!("Failed to connect to database: {}", e)))?;

    // Run migrations for apalis tables first (associated function on pool)
    PostgresStorage::setup(&pool)
        .await
        .map_err(|e| AppError::internal(format!("Failed to setup job storage: {}", e)))?;

    // Initialize PostgreSQL storage for email jobs
    let email_storage: PostgresStorage<EmailJob> = PostgresStorage::new(pool);

    tracing::info!("Job worker started. Press Ctrl+C to stop.");

    // Build and run the worker
    let worker = WorkerBuilder::new("email-worker")
        .backend(email_storage)
        .build_fn(email_job_handler);

    // Run with graceful shutdown on Ctrl+C
    let monitor = Monitor::new().register(worker);

    tokio::select! {
        result = monitor.run() => {
            if let Err(e) = result {
                tracing::error!("Worker error: {}", e);
                return Err(AppError::internal(format!("Worker failed: {}", e)));
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping worker...");
        }
    }

    tracing::info!("Job worker stopped.");
    Ok(())
}
