/// Task model and database operations
///
/// Tasks are owned by a single user and carry a set of tags through the
/// `task_tags` join table. Like tags they are create-then-read-only: no
/// update or delete surface exists, and deleting the owner cascades.
///
/// Unlike tag lookup, task lookup is always owner-scoped: a task belonging
/// to another user is indistinguishable from a missing one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     name VARCHAR(150) NOT NULL,
///     description TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
///
/// CREATE TABLE task_tags (
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     tag_id UUID NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
///     PRIMARY KEY (task_id, tag_id)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use taskbook_shared::models::task::{Task, CreateTask};
/// use taskbook_shared::db::pool::{create_pool, DatabaseConfig};
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid, tag_id: Uuid) -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let task = Task::create(
///     &pool,
///     CreateTask {
///         user_id,
///         name: "Buy groceries".to_string(),
///         description: "Milk, eggs, bread".to_string(),
///         tags: vec![tag_id],
///     },
/// )
/// .await?;
///
/// let found = Task::find_by_id_for_owner(&pool, task.id, user_id).await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Task owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Task name
    pub name: String,

    /// Task description
    pub description: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// `tags` holds ids of existing tags; existence is validated by the
/// handler and enforced by the join table's foreign keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Owning user
    pub user_id: Uuid,

    /// Task name
    pub name: String,

    /// Task description
    pub description: String,

    /// Ids of tags to attach
    pub tags: Vec<Uuid>,
}

/// Slim task projection for list views and nesting inside tag detail
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskSummary {
    /// Task ID
    pub id: Uuid,

    /// Task name
    pub name: String,
}

impl Task {
    /// Creates a new task with its tag references
    ///
    /// The task row and its join rows are written in one transaction, so a
    /// bad tag reference leaves nothing behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails, including when a
    /// referenced tag id violates the join table's foreign key.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (user_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, description, created_at, updated_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.name)
        .bind(data.description)
        .fetch_one(&mut *tx)
        .await?;

        for tag_id in &data.tags {
            sqlx::query(
                r#"
                INSERT INTO task_tags (task_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(task.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(task)
    }

    /// Finds a task by ID, scoped to its owner
    ///
    /// Returns `None` both when the id is unknown and when the task belongs
    /// to a different user.
    pub async fn find_by_id_for_owner(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists a user's tasks in insertion order
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: Uuid,
    ) -> Result<Vec<TaskSummary>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskSummary>(
            r#"
            SELECT id, name
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists the tasks carrying a tag, in task insertion order
    pub async fn list_for_tag(
        pool: &PgPool,
        tag_id: Uuid,
    ) -> Result<Vec<TaskSummary>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, TaskSummary>(
            r#"
            SELECT t.id, t.name
            FROM tasks t
            JOIN task_tags tt ON tt.task_id = t.id
            WHERE tt.tag_id = $1
            ORDER BY t.created_at ASC
            "#,
        )
        .bind(tag_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }
}
