//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;
use crate::services::tokens;

/// Authenticated user for the current request.
///
/// The full record is loaded from the store on every request, so
/// activation and privilege checks always see current state rather than
/// whatever was true when the token was minted.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// JWT authentication middleware.
///
/// Extracts and validates the bearer token from the Authorization header,
/// resolves the subject to a stored user, and injects the CurrentUser
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = tokens::decode_access_token(token, &state.config)?;

    let user = state
        .user_service
        .get_by_id(claims.sub)
        .await?
        .ok_or(AppError::UserNotFound)?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Require an active account.
pub fn require_active(user: &User) -> Result<(), AppError> {
    if user.is_active {
        Ok(())
    } else {
        Err(AppError::UserInactive)
    }
}

/// Require superuser privileges.
pub fn require_superuser(user: &User) -> Result<(), AppError> {
    if user.is_superuser {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
