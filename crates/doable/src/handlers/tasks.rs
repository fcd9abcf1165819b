//! Task CRUD handlers, plus the composite-slug lookup.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use doable_core::model::{parse_task_slug, NewTask, Task, TaskPatch};
use doable_core::storage::RepositoryError;

use crate::{
    handlers::error::{bad_request, AppError},
    state::AppState,
};

/// List all tasks (GET /api/tasks).
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    Ok(Json(state.task_repo.list_tasks().await?))
}

/// Create a new task (POST /api/tasks).
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let Json(payload) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let task = state.task_repo.create_task(payload).await?;
    tracing::info!(task_id = task.id, title = %task.title, "created task");

    Ok((StatusCode::CREATED, Json(task)))
}

/// Partially update a task (PATCH /api/tasks/{id}).
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let Json(patch) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let task = state.task_repo.update_task(id, patch).await?;
    tracing::info!(task_id = id, "updated task");

    Ok(Json(task))
}

/// Delete a task (DELETE /api/tasks/{id}).
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.task_repo.delete_task(id).await?;
    tracing::info!(task_id = id, "deleted task");

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Look up a task by composite slug (GET /api/tasks/get/{slug}).
///
/// The slug is `{project-slug}-{task-id}`, split on the last hyphen since
/// project slugs may contain hyphens themselves.
pub async fn get_task_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Task>, AppError> {
    let (project_slug, task_id) = parse_task_slug(&slug)
        .ok_or_else(|| bad_request(format!("invalid task slug format: {slug}")))?;

    let task = state
        .task_repo
        .find_task_in_project(project_slug, task_id)
        .await?
        .ok_or(RepositoryError::NotFound {
            entity_type: "Task",
            id: slug,
        })?;

    Ok(Json(task))
}
