/// Authentication middleware for Axum
///
/// Resolves the `Authorization: Token <key>` header to the owning user.
/// On success a [`CurrentUser`] is inserted into the request extensions for
/// handlers to extract; on failure the request is rejected with 401 before
/// reaching any handler.
///
/// Registration and login routes are mounted outside this middleware and
/// require no credentials.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::token::validate_token_key_format;
use crate::models::auth_token::AuthToken;

/// Authenticated caller, added to request extensions
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskbook_shared::auth::middleware::CurrentUser;
///
/// async fn handler(Extension(user): Extension<CurrentUser>) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Authenticated user ID
    pub id: Uuid,

    /// Authenticated username
    pub username: String,
}

/// Error type for authentication middleware
#[derive(Debug)]
pub enum AuthError {
    /// Missing or empty authorization credential
    MissingCredentials,

    /// Malformed header or unknown token
    InvalidToken(String),

    /// Database error during token lookup
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            AuthError::MissingCredentials => {
                (StatusCode::UNAUTHORIZED, "Missing credentials").into_response()
            }
            AuthError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg).into_response(),
            AuthError::DatabaseError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Token authentication middleware
///
/// Validates the token from the `Authorization: Token <key>` header and
/// looks up its owner in the database.
///
/// # Errors
///
/// Returns 401 Unauthorized if:
/// - The Authorization header is missing or empty
/// - The header does not carry a `Token` credential
/// - The key is unknown
///
/// Returns 500 if the token lookup itself fails.
pub async fn token_auth_middleware(
    pool: PgPool,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let key = auth_header
        .strip_prefix("Token ")
        .ok_or_else(|| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    if key.is_empty() {
        return Err(AuthError::MissingCredentials);
    }

    // Cheap format pre-filter; unknown but well-formed keys still hit the DB.
    if !validate_token_key_format(key) {
        return Err(AuthError::InvalidToken("Invalid token".to_string()));
    }

    let user = AuthToken::find_user(&pool, key)
        .await
        .map_err(|e| AuthError::DatabaseError(format!("Token lookup failed: {}", e)))?
        .ok_or_else(|| AuthError::InvalidToken("Invalid token".to_string()))?;

    let current_user = CurrentUser {
        id: user.id,
        username: user.username,
    };
    req.extensions_mut().insert(current_user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_clone() {
        let user = CurrentUser {
            id: Uuid::new_v4(),
            username: "user1".to_string(),
        };

        let cloned = user.clone();
        assert_eq!(user.id, cloned.id);
        assert_eq!(user.username, cloned.username);
    }

    #[test]
    fn test_auth_error_into_response() {
        let err = AuthError::MissingCredentials;
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let err = AuthError::InvalidToken("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let err = AuthError::DatabaseError("test".to_string());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
