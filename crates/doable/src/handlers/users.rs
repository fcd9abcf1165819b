//! User CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use doable_core::model::{NewUser, User, UserPatch};

use crate::{
    handlers::error::{bad_request, AppError},
    state::AppState,
};

/// List all users (GET /api/users).
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.user_repo.list_users().await?))
}

/// Create a new user (POST /api/users).
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(payload) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let user = state.user_repo.create_user(payload).await?;
    tracing::info!(user_id = user.id, "created user");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Partially update a user (PATCH /api/users/{id}).
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    let Json(patch) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let user = state.user_repo.update_user(id, patch).await?;
    tracing::info!(user_id = id, "updated user");

    Ok(Json(user))
}
