//! Application settings loaded from environment variables.

use std::env;

use jsonwebtoken::Algorithm;

use super::constants::{
    DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES, DEFAULT_DATABASE_URL, DEFAULT_PROJECT_NAME,
    DEFAULT_RESET_TOKEN_EXPIRE_HOURS, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SERVER_URL, MIN_JWT_SECRET_LENGTH,
};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    secret_key: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub reset_token_expire_hours: i64,
    pub server_host: String,
    pub server_port: u16,
    /// Externally visible base URL, used when building email links
    pub server_url: String,
    pub project_name: String,
    pub first_superuser: String,
    pub first_superuser_password: String,
    pub emails_enabled: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("secret_key", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("reset_token_expire_hours", &self.reset_token_expire_hours)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("server_url", &self.server_url)
            .field("project_name", &self.project_name)
            .field("first_superuser", &self.first_superuser)
            .field("first_superuser_password", &"[REDACTED]")
            .field("emails_enabled", &self.emails_enabled)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if SECRET_KEY is not set or is too short (security requirement),
    /// or if JWT_ALGORITHM names an unsupported algorithm.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let secret_key = env::var("SECRET_KEY").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                // Development mode: use default but warn
                tracing::warn!("SECRET_KEY not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            } else {
                // Production mode: panic
                panic!("SECRET_KEY environment variable must be set in production");
            }
        });

        // Validate secret length
        if secret_key.len() < MIN_JWT_SECRET_LENGTH {
            panic!(
                "SECRET_KEY must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            );
        }

        let jwt_algorithm = env::var("JWT_ALGORITHM")
            .map(|v| {
                v.parse::<Algorithm>()
                    .unwrap_or_else(|_| panic!("Unsupported JWT_ALGORITHM: {}", v))
            })
            .unwrap_or(Algorithm::HS256);

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            secret_key,
            jwt_algorithm,
            access_token_expire_minutes: env::var("ACCESS_TOKEN_EXPIRE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES),
            reset_token_expire_hours: env::var("RESET_TOKEN_EXPIRE_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_RESET_TOKEN_EXPIRE_HOURS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            server_url: env::var("SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string()),
            project_name: env::var("PROJECT_NAME")
                .unwrap_or_else(|_| DEFAULT_PROJECT_NAME.to_string()),
            first_superuser: env::var("FIRST_SUPERUSER")
                .unwrap_or_else(|_| "admin@example.com".to_string()),
            first_superuser_password: env::var("FIRST_SUPERUSER_PASSWORD")
                .unwrap_or_else(|_| "changethis".to_string()),
            emails_enabled: env::var("EMAILS_ENABLED")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        }
    }

    /// Get secret key bytes for token signing/verification.
    pub fn secret_key_bytes(&self) -> &[u8] {
        self.secret_key.as_bytes()
    }

    /// Fixed configuration for test harnesses; never reads the environment.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn test_defaults() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            secret_key: "test-secret-key-for-testing-only-32chars".to_string(),
            jwt_algorithm: Algorithm::HS256,
            access_token_expire_minutes: 60,
            reset_token_expire_hours: 2,
            server_host: "127.0.0.1".to_string(),
            server_port: 0,
            server_url: "http://testserver".to_string(),
            project_name: "Stash API".to_string(),
            first_superuser: "admin@example.com".to_string(),
            first_superuser_password: "admin-password".to_string(),
            emails_enabled: false,
        }
    }

    /// Get the full server bind address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
