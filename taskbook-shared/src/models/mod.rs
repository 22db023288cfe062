/// Database models for Taskbook
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts
/// - `auth_token`: Per-user opaque bearer tokens
/// - `tag`: Tags owned by a user
/// - `task`: Tasks owned by a user, carrying a set of tags
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::models::user::{User, CreateUser};
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "user1".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod auth_token;
pub mod tag;
pub mod task;
pub mod user;
