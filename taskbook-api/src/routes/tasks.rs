/// Task endpoints
///
/// # Endpoints
///
/// - `GET /tasks/` - List the caller's tasks
/// - `GET /task/:id` - Task detail with its tags (owner-scoped)
/// - `POST /task/create/` - Create a task referencing existing tags

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    routes::require_field,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskbook_shared::{
    auth::middleware::CurrentUser,
    models::{
        tag::{Tag, TagSummary},
        task::{CreateTask, Task, TaskSummary},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// Task name
    #[validate(length(max = 150, message = "Name must be at most 150 characters"))]
    pub name: Option<String>,

    /// Task description
    pub description: Option<String>,

    /// Ids of tags to attach; every id must name an existing tag
    pub tags: Option<Vec<Uuid>>,
}

/// Task detail response: full fields minus owner, plus its tags
#[derive(Debug, Serialize)]
pub struct TaskDetailResponse {
    /// Task ID
    pub id: Uuid,

    /// Task name
    pub name: String,

    /// Task description
    pub description: String,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,

    /// Tags attached to this task
    pub tags: Vec<TagSummary>,
}

/// Create task response
#[derive(Debug, Serialize)]
pub struct TaskCreateResponse {
    /// Task ID
    pub id: Uuid,

    /// Owning user
    pub user: Uuid,

    /// Task name
    pub name: String,

    /// Task description
    pub description: String,

    /// Ids of the attached tags
    pub tags: Vec<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// List the caller's tasks
///
/// Returns `[{id, name}]` in insertion order.
///
/// # Errors
///
/// - `404 Not Found`: The caller owns no tasks. An empty collection is an
///   error on this surface, not an empty list.
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TaskSummary>>> {
    let tasks = Task::list_by_owner(&state.db, user.id).await?;

    if tasks.is_empty() {
        return Err(ApiError::NotFound("Tasks not found".to_string()));
    }

    Ok(Json(tasks))
}

/// Task detail with nested tag summaries
///
/// Lookup is owner-scoped: a task belonging to someone else is
/// indistinguishable from a missing one.
///
/// # Errors
///
/// - `404 Not Found`: No task with this id belongs to the caller
pub async fn task_detail(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskDetailResponse>> {
    let task = Task::find_by_id_for_owner(&state.db, id, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    let tags = Tag::list_for_task(&state.db, task.id).await?;

    Ok(Json(TaskDetailResponse {
        id: task.id,
        name: task.name,
        description: task.description,
        created_at: task.created_at,
        updated_at: task.updated_at,
        tags,
    }))
}

/// Create a task owned by the caller
///
/// Referenced tag ids must exist but may belong to any user; ownership of
/// the tags is not checked.
///
/// # Errors
///
/// - `400 Bad Request`: Required fields missing/blank, or a referenced tag
///   id does not exist
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskCreateResponse>)> {
    req.validate()?;

    let name = require_field(&req.name, "name")?;
    let description = require_field(&req.description, "description")?;

    let mut tag_ids = req
        .tags
        .clone()
        .ok_or_else(|| ApiError::missing_field("tags"))?;
    tag_ids.sort();
    tag_ids.dedup();

    let existing = Tag::count_existing(&state.db, &tag_ids).await?;
    if existing != tag_ids.len() as i64 {
        return Err(ApiError::Validation(vec![ValidationErrorDetail {
            field: "tags".to_string(),
            message: "One or more referenced tags do not exist".to_string(),
        }]));
    }

    let task = Task::create(
        &state.db,
        CreateTask {
            user_id: user.id,
            name: name.to_string(),
            description: description.to_string(),
            tags: tag_ids.clone(),
        },
    )
    .await?;

    tracing::debug!(task_id = %task.id, user_id = %user.id, "Created task");

    Ok((
        StatusCode::CREATED,
        Json(TaskCreateResponse {
            id: task.id,
            user: task.user_id,
            name: task.name,
            description: task.description,
            tags: tag_ids,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }),
    ))
}
