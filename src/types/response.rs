//! Shared response types.

use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome
    #[schema(example = "Password recovery email sent")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
