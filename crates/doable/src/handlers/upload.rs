//! File upload handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{handlers::AppError, state::AppState, storage::s3::UploadError};

const KEY_PREFIX: &str = "uploads";
const DEFAULT_EXTENSION: &str = "png";

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub key: String,
}

/// Forward a raw binary body to object storage (POST /api/upload).
///
/// Content type and suggested filename come from the `Content-Type` and
/// `X-File-Name` headers; the stored key keeps the original extension.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UploadResponse>, AppError> {
    if body.is_empty() {
        return Err(UploadError::EmptyBody.into());
    }

    let store = state.object_store.as_ref().ok_or(UploadError::Unconfigured)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");
    let file_name = headers
        .get("x-file-name")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("upload");

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_EXTENSION);
    let key = format!("{KEY_PREFIX}/{}.{extension}", Uuid::new_v4());

    tracing::debug!(%key, content_type, size = body.len(), "uploading object");

    store.put(&key, body.to_vec(), content_type).await?;

    tracing::info!(%key, "uploaded object");

    let url = store.public_url(&key);
    Ok(Json(UploadResponse { url, key }))
}
