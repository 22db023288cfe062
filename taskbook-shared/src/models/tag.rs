/// Tag model and database operations
///
/// Tags are owned by a single user and attached to tasks through the
/// `task_tags` join table. They are created once and never updated or
/// deleted through the API; deleting the owner cascades.
///
/// Listing is always owner-scoped. Lookup by id is not: `find_by_id`
/// returns any existing tag regardless of requester, which is the behavior
/// the detail endpoint exposes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tags (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(150) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::models::tag::{Tag, CreateTag};
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let tag = Tag::create(
///     &pool,
///     CreateTag {
///         user_id,
///         name: "errands".to_string(),
///     },
/// )
/// .await?;
///
/// let tags = Tag::list_by_owner(&pool, user_id).await?;
/// assert!(tags.iter().any(|t| t.id == tag.id));
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Tag owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    /// Unique tag ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Tag name
    pub name: String,

    /// When the tag was created
    pub created_at: DateTime<Utc>,

    /// When the tag was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// Owning user
    pub user_id: Uuid,

    /// Tag name
    pub name: String,
}

/// Slim tag projection for list views and nesting inside task detail
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TagSummary {
    /// Tag ID
    pub id: Uuid,

    /// Tag name
    pub name: String,
}

impl Tag {
    /// Creates a new tag
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails
    pub async fn create(pool: &PgPool, data: CreateTag) -> Result<Self, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (user_id, name)
            VALUES ($1, $2)
            RETURNING id, user_id, name, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .fetch_one(pool)
        .await?;

        Ok(tag)
    }

    /// Finds a tag by ID
    ///
    /// Lookup is by id only; there is no owner filter here.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, user_id, name, created_at, updated_at
            FROM tags
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(tag)
    }

    /// Lists a user's tags in insertion order
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TagSummary>, sqlx::Error> {
        let tags = sqlx::query_as::<_, TagSummary>(
            r#"
            SELECT id, name
            FROM tags
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Lists the tags attached to a task, in tag insertion order
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: Uuid,
    ) -> Result<Vec<TagSummary>, sqlx::Error> {
        let tags = sqlx::query_as::<_, TagSummary>(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN task_tags tt ON tt.tag_id = t.id
            WHERE tt.task_id = $1
            ORDER BY t.created_at ASC
            "#,
        )
        .bind(task_id)
        .fetch_all(pool)
        .await?;

        Ok(tags)
    }

    /// Counts how many of the given tag ids exist
    ///
    /// Used to validate task creation input: every referenced id must name
    /// an existing tag (owned by anyone). Callers pass deduplicated ids so
    /// the count is comparable to the input length.
    pub async fn count_existing(pool: &PgPool, ids: &[Uuid]) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM tags
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }
}
