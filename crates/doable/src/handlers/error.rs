use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use doable_core::auth::{auth_error_to_status_code, AuthError};
use doable_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::storage::s3::{upload_error_to_status_code, UploadError};

/// Application error type that wraps `anyhow::Error`.
///
/// Lets handlers use `?` on any error in the taxonomy; the concrete type
/// is recovered by downcast to pick the status code.
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            repository_error_to_status_code(repo_error)
        } else if let Some(auth_error) = self.0.downcast_ref::<AuthError>() {
            auth_error_to_status_code(auth_error)
        } else if let Some(upload_error) = self.0.downcast_ref::<UploadError>() {
            upload_error_to_status_code(upload_error)
        } else {
            500
        };

        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.0, "request failed");
        }

        (status, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Shorthand for a 400 with a message, used for body-rejection mapping.
pub fn bad_request(message: impl Into<String>) -> AppError {
    AppError(anyhow::Error::new(RepositoryError::InvalidRequest(
        message.into(),
    )))
}
