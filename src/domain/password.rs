//! Password value object - Domain layer password handling.
//!
//! DDD: Encapsulates password hashing as a domain value object.
//! SOLID (SRP): Single responsibility - password operations only.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
///
/// Immutable, compared by value. The wrapped string is always a salted
/// one-way digest; the plaintext never leaves the constructor.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// Each call salts independently, so the same plaintext yields a
    /// different digest every time.
    ///
    /// # Errors
    /// Returns a validation error if the password is too short.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from the store).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// Never errors: malformed hashes and mismatches both report `false`.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}
