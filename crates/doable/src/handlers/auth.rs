//! Login handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use doable_core::auth::{verify_password, AuthError};
use doable_core::model::User;

use crate::{
    handlers::error::{bad_request, AppError},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Check credentials (POST /api/auth/login).
///
/// Unknown email and wrong password return the same 401 body. The token is
/// a timestamp-derived placeholder: it carries no authority and nothing
/// else in the system verifies it.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) =
        body.map_err(|e| bad_request(format!("failed to parse request body: {e}")))?;

    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => return Err(bad_request("email and password are required")),
    };

    let credentials = state
        .user_repo
        .find_by_email(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(&password, &credentials.password_hash) {
        return Err(AuthError::InvalidCredentials.into());
    }

    tracing::info!(user_id = credentials.user.id, "login succeeded");

    let token = format!("mock-token-{}", Utc::now().timestamp_millis());
    Ok(Json(LoginResponse {
        user: credentials.user,
        token,
    }))
}
