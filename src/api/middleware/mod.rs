//! HTTP middleware.

mod auth;

pub use auth::{auth_middleware, require_active, require_superuser, CurrentUser};
