//! Signed token issuance and validation.
//!
//! Two token families share the process-wide signing key and algorithm:
//! access tokens carrying the user identity, and password-reset tokens
//! carrying the account email as subject. Reset verification fails closed:
//! expiry, signature mismatch, and malformed payloads all yield `None`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, TOKEN_TYPE_BEARER};
use crate::errors::AppResult;

/// Access token claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user identity
    pub sub: i32,
    pub exp: i64,
    pub iat: i64,
}

/// Password-reset token claims; the subject is the account email
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetClaims {
    pub sub: String,
    pub exp: i64,
    pub nbf: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Signed access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "bearer")
    #[schema(example = "bearer")]
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

/// Issue a time-bound access token for the given user.
pub fn issue_access_token(user_id: i32, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::minutes(config.access_token_expire_minutes);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::new(config.jwt_algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret_key_bytes()),
    )?;

    Ok(token)
}

/// Decode and validate an access token.
pub fn decode_access_token(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key_bytes()),
        &Validation::new(config.jwt_algorithm),
    )?;

    Ok(token_data.claims)
}

/// Issue a password-reset token for the given account email.
pub fn issue_reset_token(email: &str, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.reset_token_expire_hours);

    let claims = ResetClaims {
        sub: email.to_string(),
        exp: expires_at.timestamp(),
        nbf: now.timestamp(),
    };

    let token = encode(
        &Header::new(config.jwt_algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret_key_bytes()),
    )?;

    Ok(token)
}

/// Validate a password-reset token and return the embedded email.
///
/// Returns `None` for anything that does not verify: wrong signature,
/// expired or not-yet-valid claims, or a payload of the wrong shape.
pub fn verify_reset_token(token: &str, config: &Config) -> Option<String> {
    let mut validation = Validation::new(config.jwt_algorithm);
    validation.validate_nbf = true;

    decode::<ResetClaims>(
        token,
        &DecodingKey::from_secret(config.secret_key_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims.sub)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::test_defaults()
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = config();
        let token = issue_access_token(42, &config).unwrap();
        let claims = decode_access_token(&token, &config).unwrap();

        assert_eq!(claims.sub, 42);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_access_token_rejects_tampered_signature() {
        let config = config();
        let mut token = issue_access_token(42, &config).unwrap();
        token.push('x');

        assert!(decode_access_token(&token, &config).is_err());
    }

    #[test]
    fn test_reset_token_round_trip() {
        let config = config();
        let token = issue_reset_token("user@example.com", &config).unwrap();

        assert_eq!(
            verify_reset_token(&token, &config).as_deref(),
            Some("user@example.com")
        );
    }

    #[test]
    fn test_reset_token_expired_is_none() {
        let config = config();
        let now = Utc::now();
        let claims = ResetClaims {
            sub: "user@example.com".to_string(),
            // Expired two hours ago, well past the default decode leeway
            exp: (now - Duration::hours(2)).timestamp(),
            nbf: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::new(config.jwt_algorithm),
            &claims,
            &EncodingKey::from_secret(config.secret_key_bytes()),
        )
        .unwrap();

        assert_eq!(verify_reset_token(&token, &config), None);
    }

    #[test]
    fn test_reset_token_wrong_key_is_none() {
        let config = config();
        let claims = ResetClaims {
            sub: "user@example.com".to_string(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            nbf: Utc::now().timestamp(),
        };
        let token = encode(
            &Header::new(config.jwt_algorithm),
            &claims,
            &EncodingKey::from_secret(b"some-other-secret-key-32-characters"),
        )
        .unwrap();

        assert_eq!(verify_reset_token(&token, &config), None);
    }

    #[test]
    fn test_reset_token_malformed_is_none() {
        let config = config();

        assert_eq!(verify_reset_token("not-a-token", &config), None);
        assert_eq!(verify_reset_token("", &config), None);
    }

    #[test]
    fn test_reset_token_is_not_an_access_token() {
        let config = config();
        let token = issue_reset_token("user@example.com", &config).unwrap();

        // The access decoder expects an integer subject
        assert!(decode_access_token(&token, &config).is_err());
    }
}
