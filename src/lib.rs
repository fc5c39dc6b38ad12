//! Stash API - Multi-tenant item storage backend.
//!
//! Authenticated users create, read, update and delete their own item
//! records; superusers manage everyone's. Built on a clean architecture
//! foundation with Axum and SeaORM.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, unit of work)
//! - **jobs**: Background jobs and outbound notifications
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, responses)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Create the first superuser
//! cargo run -- init
//!
//! # Start the email worker
//! cargo run -- jobs work
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Item, Password, User};
pub use errors::{AppError, AppResult};
