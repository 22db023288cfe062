/// Auth token model and database operations
///
/// Each user holds exactly one opaque token, created lazily the first time
/// they register or log in and returned unchanged on every later login.
/// The key is the stored credential: later logins must hand back the same
/// key, so it is persisted as issued rather than hashed at rest. Tokens
/// never rotate or expire and disappear only when their owner is deleted.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE auth_tokens (
///     key VARCHAR(64) PRIMARY KEY,
///     user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::models::auth_token::AuthToken;
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// // First call mints a key, later calls return the same row
/// let token = AuthToken::get_or_create(&pool, user_id).await?;
/// assert!(token.key.starts_with("tb_"));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::token::generate_token_key;
use crate::models::user::User;

/// Auth token bound to a single user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthToken {
    /// Opaque token key ("tb_" + 40 random chars)
    pub key: String,

    /// Owning user
    pub user_id: Uuid,

    /// When the token was issued
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    /// Issues a token for the user, or returns the existing one
    ///
    /// A single upsert keeps this race-free: concurrent first logins both
    /// land on the one row the unique user_id constraint allows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn get_or_create(pool: &PgPool, user_id: Uuid) -> Result<Self, sqlx::Error> {
        let candidate_key = generate_token_key();

        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET key = auth_tokens.key
            RETURNING key, user_id, created_at
            "#,
        )
        .bind(candidate_key)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(token)
    }

    /// Resolves a token key to its owning user
    ///
    /// Returns `None` when the key is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn find_user(pool: &PgPool, key: &str) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.password_hash, u.created_at, u.updated_at
            FROM users u
            JOIN auth_tokens t ON t.user_id = u.id
            WHERE t.key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Finds the token for a user, if one has been issued
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            SELECT key, user_id, created_at
            FROM auth_tokens
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_serializes_key_and_owner() {
        let token = AuthToken {
            key: "tb_0123456789012345678901234567890123456789".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["key"], token.key);
        assert_eq!(json["user_id"], token.user_id.to_string());
    }
}
