//! Generic data record CRUD handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use doable_core::model::{DataRecord, DataRecordPatch, NewDataRecord};

use crate::{
    handlers::error::{bad_request, AppError},
    state::AppState,
};

/// List all data records (GET /api/data).
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<Vec<DataRecord>>, AppError> {
    Ok(Json(state.data_repo.list_records().await?))
}

/// Create a new data record (POST /api/data).
///
/// `name` is unique; a duplicate fails with 409.
pub async fn create_record(
    State(state): State<AppState>,
    body: Result<Json<NewDataRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<DataRecord>), AppError> {
    let Json(payload) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let record = state.data_repo.create_record(payload).await?;
    tracing::info!(record_id = record.id, name = %record.name, "created data record");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Partially update a data record (PATCH /api/data/{id}).
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<DataRecordPatch>, JsonRejection>,
) -> Result<Json<DataRecord>, AppError> {
    let Json(patch) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let record = state.data_repo.update_record(id, patch).await?;
    tracing::info!(record_id = id, "updated data record");

    Ok(Json(record))
}
