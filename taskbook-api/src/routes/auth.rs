/// Authentication endpoints
///
/// Registration and login. Both are open routes: they are the only way to
/// obtain the token every other endpoint requires.
///
/// # Endpoints
///
/// - `POST /register` - Create an account and receive a token
/// - `POST /login` - Authenticate and receive the same token back

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::require_field,
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use taskbook_shared::{
    auth::password,
    models::{
        auth_token::AuthToken,
        user::{CreateUser, User},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(length(max = 150, message = "Username must be at most 150 characters"))]
    pub username: Option<String>,

    /// Password (stored as an Argon2id hash)
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(length(max = 150, message = "Username must be at most 150 characters"))]
    pub username: Option<String>,

    /// Password
    pub password: Option<String>,
}

/// Response for both register and login
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// User ID
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Opaque token for the `Authorization: Token <key>` header
    pub token: String,
}

/// Register a new user
///
/// Creates an account with a hashed credential and issues its auth token.
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "username": "user1",
///   "password": "user1-password"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "username": "user1",
///   "token": "tb_..."
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing/blank fields or username already taken
/// - `500 Internal Server Error`: Hashing or database failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let username = require_field(&req.username, "username")?;

    // Passwords are taken verbatim, whitespace included
    let password = req
        .password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::missing_field("password"))?;

    let password_hash = password::hash_password(password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            ApiError::BadRequest("Failed to register, verify the entered data".to_string())
        }
        other => ApiError::from(other),
    })?;

    let token = AuthToken::get_or_create(&state.db, user.id).await?;

    tracing::info!(user_id = %user.id, "Registered new user");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: user.id,
            username: user.username,
            token: token.key,
        }),
    ))
}

/// Login endpoint
///
/// Verifies the password against the stored Argon2id hash and returns the
/// user's token, issuing one if they have none yet.
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "username": "user1",
///   "password": "user1-password"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing fields or invalid credentials
/// - `500 Internal Server Error`: Database failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let password = req.password.as_deref().filter(|s| !s.is_empty());

    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::BadRequest(
            "Enter username and password".to_string(),
        ));
    };

    // The same error for an unknown user and a wrong password, so the
    // response does not reveal which usernames exist.
    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid username or password".to_string()))?;

    let valid = password::verify_password(password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::BadRequest(
            "Invalid username or password".to_string(),
        ));
    }

    let token = AuthToken::get_or_create(&state.db, user.id).await?;

    Ok(Json(AuthResponse {
        id: user.id,
        username: user.username,
        token: token.key,
    }))
}
