//! Project CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use doable_core::model::{NewProject, Project, ProjectPatch};

use crate::{
    handlers::error::{bad_request, AppError},
    state::AppState,
};

/// List all projects (GET /api/projects).
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<Project>>, AppError> {
    Ok(Json(state.project_repo.list_projects().await?))
}

/// Create a new project (POST /api/projects).
pub async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let Json(payload) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let project = state.project_repo.create_project(payload).await?;
    tracing::info!(project_id = project.id, slug = %project.slug, "created project");

    Ok((StatusCode::CREATED, Json(project)))
}

/// Partially update a project (PATCH /api/projects/{id}).
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<ProjectPatch>, JsonRejection>,
) -> Result<Json<Project>, AppError> {
    let Json(patch) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let project = state.project_repo.update_project(id, patch).await?;
    tracing::info!(project_id = id, "updated project");

    Ok(Json(project))
}
