//! Background jobs and outbound notifications.

pub mod email_job;
pub mod notifier;

pub use email_job::{email_job_handler, EmailJob};
pub use notifier::{LogNotifier, Notifier, QueueNotifier};

#[cfg(any(test, feature = "test-utils"))]
pub use notifier::MockNotifier;
