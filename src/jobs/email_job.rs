//! Email background job.
//!
//! Provides email sending functionality via background jobs.
//! In development mode, emails are logged. In production, configure
//! SMTP settings via environment variables.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AppError;

/// Email job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text)
    pub body: String,
    /// Optional sender override (defaults to SMTP_FROM)
    #[serde(default)]
    pub from: Option<String>,
}

impl EmailJob {
    /// Create a new email job
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
        }
    }

    /// Welcome email for a freshly created account
    pub fn account_created(
        project_name: &str,
        server_url: &str,
        to: &str,
        username: &str,
        password: &str,
    ) -> Self {
        let subject = format!("{} - New account for user {}", project_name, username);
        let body = format!(
            "Welcome to {project_name}!\n\n\
             An account was created for you.\n\n\
             Username: {username}\n\
             Password: {password}\n\n\
             Log in here: {server_url}\n",
        );
        Self::new(to, subject, body)
    }

    /// Password recovery email carrying the reset link
    pub fn password_reset(
        project_name: &str,
        server_url: &str,
        to: &str,
        username: &str,
        token: &str,
        valid_hours: i64,
    ) -> Self {
        let subject = format!("{} - Password recovery for user {}", project_name, username);
        let link = format!("{}/reset-password?token={}", server_url, token);
        let body = format!(
            "A password recovery was requested for {username}.\n\n\
             Reset your password here (valid for {valid_hours} hours):\n\
             {link}\n\n\
             If you did not request a recovery, you can ignore this email.\n",
        );
        Self::new(to, subject, body)
    }
}

/// Email configuration from environment.
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_from: String,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    let config = EmailConfig::from_env();
    let from = job.from.as_deref().unwrap_or(&config.smtp_from);

    tracing::info!(
        to = %job.to,
        from = %from,
        subject = %job.subject,
        "Processing email job"
    );

    if !config.is_configured() {
        // Development mode: log the email instead of sending
        tracing::warn!("SMTP not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    // TODO: wire lettre for real SMTP delivery once a relay is provisioned
    tracing::warn!(
        "SMTP is configured but no SMTP transport is compiled in; email to {} not sent",
        job.to
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_reset_contains_link_and_window() {
        let job = EmailJob::password_reset(
            "Stash API",
            "http://localhost:3000",
            "user@example.com",
            "user@example.com",
            "tok123",
            48,
        );

        assert_eq!(job.to, "user@example.com");
        assert!(job.subject.contains("Password recovery"));
        assert!(job
            .body
            .contains("http://localhost:3000/reset-password?token=tok123"));
        assert!(job.body.contains("48 hours"));
    }

    #[test]
    fn test_account_created_mentions_credentials() {
        let job = EmailJob::account_created(
            "Stash API",
            "http://localhost:3000",
            "new@example.com",
            "new@example.com",
            "secret-password",
        );

        assert!(job.subject.contains("New account"));
        assert!(job.body.contains("new@example.com"));
        assert!(job.body.contains("secret-password"));
    }
}
