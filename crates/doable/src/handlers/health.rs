//! Health check endpoints.
//!
//! - `/livez` - liveness probe (immediate 200, no checks)
//! - `/healthz` - readiness probe (trivial database query)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::state::AppState;

/// GET /livez - returns 200 as soon as the server accepts connections.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - verifies the database answers a trivial query.
pub async fn healthz(State(state): State<AppState>) -> Response {
    match state.user_repo.count_users().await {
        Ok(_) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({
                "status": "degraded",
                "error": e.to_string(),
            })),
        )
            .into_response(),
    }
}
