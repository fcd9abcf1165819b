use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        auth::login,
        data::{create_record, list_records, update_record},
        health::{healthz, livez},
        projects::{create_project, list_projects, update_project},
        sprints::{create_sprint, delete_sprint, list_sprints, update_sprint},
        tasks::{create_task, delete_task, get_task_by_slug, list_tasks, update_task},
        upload::upload,
        users::{create_user, list_users, update_user},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    // API routes with CORS
    let api_routes = Router::new()
        .route("/auth/login", post(login))
        // User routes
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", patch(update_user))
        // Project routes
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", patch(update_project))
        // Task routes
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .route("/tasks/get/{slug}", get(get_task_by_slug))
        // Sprint routes
        .route("/sprints", get(list_sprints).post(create_sprint))
        .route("/sprints/{id}", patch(update_sprint).delete(delete_sprint))
        // Data record routes
        .route("/data", get(list_records).post(create_record))
        .route("/data/{id}", patch(update_record))
        // Upload route
        .route("/upload", post(upload))
        .layer(cors);

    // Main application router
    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
