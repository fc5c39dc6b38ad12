//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub full_name: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl User {
    /// Check if user may authenticate and receive tokens
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Check if user has unrestricted access to all records
    pub fn is_superuser(&self) -> bool {
        self.is_superuser
    }
}

/// Insert payload for a user row; identity is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: Option<String>,
    pub email: String,
    pub hashed_password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

fn default_is_active() -> bool {
    true
}

/// User creation data transfer object
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUser {
    /// User email address (login identifier, unique)
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User password (minimum 8 characters, never stored raw)
    #[schema(example = "SecurePass123!", min_length = 8)]
    pub password: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub full_name: Option<String>,
    /// Whether the account can authenticate (defaults to true)
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    /// Whether the account has unrestricted access (defaults to false)
    #[serde(default)]
    pub is_superuser: bool,
}

impl CreateUser {
    /// Minimal creation payload with defaults applied
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name: None,
            is_active: true,
            is_superuser: false,
        }
    }
}

/// User partial update data transfer object.
///
/// Absent fields are left untouched; a present password is re-hashed
/// before storage.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateUser {
    /// New email address
    #[schema(example = "user@example.com")]
    pub email: Option<String>,
    /// New display name
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,
    /// New password
    #[schema(example = "NewSecurePass456!", min_length = 8)]
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// User response (safe to return to clients)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = 1)]
    pub id: i32,
    /// User email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// User display name
    #[schema(example = "John Doe")]
    pub full_name: Option<String>,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            is_active: user.is_active,
            is_superuser: user.is_superuser,
        }
    }
}
