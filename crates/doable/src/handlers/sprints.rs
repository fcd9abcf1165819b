//! Sprint CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use doable_core::model::{NewSprint, Sprint, SprintPatch};

use crate::{
    handlers::error::{bad_request, AppError},
    state::AppState,
};

/// List all sprints (GET /api/sprints).
pub async fn list_sprints(State(state): State<AppState>) -> Result<Json<Vec<Sprint>>, AppError> {
    Ok(Json(state.sprint_repo.list_sprints().await?))
}

/// Create a new sprint (POST /api/sprints).
pub async fn create_sprint(
    State(state): State<AppState>,
    body: Result<Json<NewSprint>, JsonRejection>,
) -> Result<(StatusCode, Json<Sprint>), AppError> {
    let Json(payload) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let sprint = state.sprint_repo.create_sprint(payload).await?;
    tracing::info!(sprint_id = sprint.id, name = %sprint.name, "created sprint");

    Ok((StatusCode::CREATED, Json(sprint)))
}

/// Partially update a sprint (PATCH /api/sprints/{id}).
pub async fn update_sprint(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<SprintPatch>, JsonRejection>,
) -> Result<Json<Sprint>, AppError> {
    let Json(patch) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let sprint = state.sprint_repo.update_sprint(id, patch).await?;
    tracing::info!(sprint_id = id, "updated sprint");

    Ok(Json(sprint))
}

/// Delete a sprint (DELETE /api/sprints/{id}).
pub async fn delete_sprint(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.sprint_repo.delete_sprint(id).await?;
    tracing::info!(sprint_id = id, "deleted sprint");

    Ok(Json(serde_json::json!({ "success": true })))
}
