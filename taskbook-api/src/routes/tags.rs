/// Tag endpoints
///
/// # Endpoints
///
/// - `GET /tags/` - List the caller's tags
/// - `GET /tag/:id` - Tag detail with the tasks carrying it
/// - `POST /tag/create/` - Create a tag owned by the caller

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
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
        tag::{CreateTag, Tag, TagSummary},
        task::{Task, TaskSummary},
    },
};
use uuid::Uuid;
use validator::Validate;

/// Create tag request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Tag name
    #[validate(length(max = 150, message = "Name must be at most 150 characters"))]
    pub name: Option<String>,
}

/// Tag detail response: full fields minus owner, plus the tasks carrying it
#[derive(Debug, Serialize)]
pub struct TagDetailResponse {
    /// Tag ID
    pub id: Uuid,

    /// Tag name
    pub name: String,

    /// When the tag was created
    pub created_at: DateTime<Utc>,

    /// When the tag was last updated
    pub updated_at: DateTime<Utc>,

    /// Tasks carrying this tag
    pub tasks: Vec<TaskSummary>,
}

/// Create tag response
#[derive(Debug, Serialize)]
pub struct TagCreateResponse {
    /// Tag ID
    pub id: Uuid,

    /// Tag name
    pub name: String,

    /// Owning user
    pub user: Uuid,

    /// When the tag was created
    pub created_at: DateTime<Utc>,

    /// When the tag was last updated
    pub updated_at: DateTime<Utc>,
}

/// List the caller's tags
///
/// Returns `[{id, name}]` in insertion order.
///
/// # Errors
///
/// - `404 Not Found`: The caller owns no tags. An empty collection is an
///   error on this surface, not an empty list.
pub async fn list_tags(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<TagSummary>>> {
    let tags = Tag::list_by_owner(&state.db, user.id).await?;

    if tags.is_empty() {
        return Err(ApiError::NotFound("Tags not found".to_string()));
    }

    Ok(Json(tags))
}

/// Tag detail with nested task summaries
///
/// Lookup is by id alone; tag detail is not owner-scoped, so any
/// authenticated caller can read any existing tag.
///
/// # Errors
///
/// - `404 Not Found`: No tag with this id exists
pub async fn tag_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TagDetailResponse>> {
    let tag = Tag::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Tag not found".to_string()))?;

    let tasks = Task::list_for_tag(&state.db, tag.id).await?;

    Ok(Json(TagDetailResponse {
        id: tag.id,
        name: tag.name,
        created_at: tag.created_at,
        updated_at: tag.updated_at,
        tasks,
    }))
}

/// Create a tag owned by the caller
///
/// # Errors
///
/// - `400 Bad Request`: Name missing, blank or too long
pub async fn create_tag(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateTagRequest>,
) -> ApiResult<(StatusCode, Json<TagCreateResponse>)> {
    req.validate()?;

    let name = require_field(&req.name, "name")?;

    let tag = Tag::create(
        &state.db,
        CreateTag {
            user_id: user.id,
            name: name.to_string(),
        },
    )
    .await?;

    tracing::debug!(tag_id = %tag.id, user_id = %user.id, "Created tag");

    Ok((
        StatusCode::CREATED,
        Json(TagCreateResponse {
            id: tag.id,
            name: tag.name,
            user: tag.user_id,
            created_at: tag.created_at,
            updated_at: tag.updated_at,
        }),
    ))
}
