//! SQLite repository implementation.
//!
//! Implements the repository traits from `doable_core::storage` over a
//! single shared tokio-rusqlite connection. The underlying connection
//! serializes writers; handlers share it through `AppState` for the whole
//! process lifetime. Every mutation is one autocommitted statement plus an
//! independent read-back of the affected row.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;

use doable_core::auth::hash_password;
use doable_core::model::{
    DataRecord, DataRecordPatch, NewDataRecord, NewProject, NewSprint, NewTask, NewUser, Project,
    ProjectPatch, Sprint, SprintPatch, Task, TaskPatch, User, UserCredentials, UserPatch,
};
use doable_core::storage::{
    DataRepository, ProjectRepository, RepositoryError, Result, SprintRepository, TaskRepository,
    UserRepository,
};

use super::conversions::{
    data_record_update_set, format_datetime, json_to_text, project_update_set, row_to_credentials,
    row_to_data_record, row_to_project, row_to_sprint, row_to_task, row_to_user,
    sprint_update_set, sql_param_value, task_update_set, user_update_set,
};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

fn hash_err(e: doable_core::auth::AuthError) -> RepositoryError {
    RepositoryError::Internal(e.to_string())
}

/// SQLite-based repository implementation for all five entities.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (creating if absent) the database file, switches it to WAL
    /// for concurrent reads alongside the single writer, and runs the
    /// idempotent schema setup.
    pub async fn new(path: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        conn.call(|conn| {
            conn.pragma_update(None, "journal_mode", "WAL")
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository backed by an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_USERS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_user).map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    users.push(row_result.map_err(wrap_err)?);
                }
                Ok(users)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_user(&self, input: NewUser) -> Result<User> {
        let password_hash = hash_password(&input.password).map_err(hash_err)?;
        let username = input.username;
        let email = input.email.clone();
        let role = input.role.unwrap_or_else(|| "user".to_string());
        let avatar = input.avatar;
        let status = input.status.unwrap_or_else(|| "active".to_string());
        let data = json_to_text(&input.data.unwrap_or_else(|| serde_json::json!({})))?;
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![
                        username,
                        email,
                        role,
                        password_hash,
                        avatar,
                        status,
                        data,
                        now,
                        now
                    ],
                )
                .map_err(wrap_err)?;

                let id = conn.last_insert_rowid();
                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_user).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", input.email))
    }

    async fn update_user(&self, id: i64, mut patch: UserPatch) -> Result<User> {
        // A supplied password is hashed exactly as at creation time.
        if let Some(password) = patch.password.take() {
            patch.password = Some(hash_password(&password).map_err(hash_err)?);
        }

        let set = user_update_set(patch)?;
        let (sql, params) = set.into_query("users", id, format_datetime(&Utc::now()))?;

        self.conn
            .call(move |conn| {
                conn.execute(
                    &sql,
                    rusqlite::params_from_iter(params.iter().map(sql_param_value)),
                )
                .map_err(wrap_err)?;

                let mut stmt = conn.prepare(schema::SELECT_USER_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_user).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let email = email.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_CREDENTIALS_BY_EMAIL)
                    .map_err(wrap_err)?;
                match stmt.query_row([&email], row_to_credentials) {
                    Ok(credentials) => Ok(Some(credentials)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn count_users(&self) -> Result<i64> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::COUNT_USERS).map_err(wrap_err)?;
                stmt.query_row([], |row| row.get(0)).map_err(wrap_err)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// ProjectRepository implementation
// ============================================================================

#[async_trait]
impl ProjectRepository for SqliteRepository {
    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_PROJECTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_project).map_err(wrap_err)?;

                let mut projects = Vec::new();
                for row_result in rows {
                    projects.push(row_result.map_err(wrap_err)?);
                }
                Ok(projects)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_project(&self, input: NewProject) -> Result<Project> {
        let name = input.name.clone();
        let slug = input.slug;
        let description = input.description;
        let owner_id = input.owner_id;
        let status = input.status.unwrap_or_else(|| "active".to_string());
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_PROJECT,
                    rusqlite::params![name, slug, description, owner_id, status, now, now],
                )
                .map_err(wrap_err)?;

                let id = conn.last_insert_rowid();
                let mut stmt = conn.prepare(schema::SELECT_PROJECT_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_project).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Project", input.name))
    }

    async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Project> {
        let set = project_update_set(patch)?;
        let (sql, params) = set.into_query("projects", id, format_datetime(&Utc::now()))?;

        self.conn
            .call(move |conn| {
                conn.execute(
                    &sql,
                    rusqlite::params_from_iter(params.iter().map(sql_param_value)),
                )
                .map_err(wrap_err)?;

                let mut stmt = conn.prepare(schema::SELECT_PROJECT_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_project).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Project", id.to_string()))
    }
}

// ============================================================================
// TaskRepository implementation
// ============================================================================

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_TASKS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_task).map_err(wrap_err)?;

                let mut tasks = Vec::new();
                for row_result in rows {
                    tasks.push(row_result.map_err(wrap_err)?);
                }
                Ok(tasks)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_task(&self, input: NewTask) -> Result<Task> {
        let title = input.title.clone();
        let description = input.description;
        let status = input.status.unwrap_or(0);
        let project_id = input.project_id;
        let user_id = input.user_id;
        let data = json_to_text(&input.data)?;
        let attachments = json_to_text(&input.attachments)?;
        let comments = json_to_text(&input.comments)?;
        let tags = json_to_text(&input.tags)?;
        let labels = json_to_text(&input.labels)?;
        let assignees = json_to_text(&input.assignees)?;
        let subtasks = json_to_text(&input.subtasks)?;
        let priority = input.priority.unwrap_or(0);
        let kind = input.kind.unwrap_or_else(|| "task".to_string());
        let due_date = input.due_date.as_ref().map(format_datetime);
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TASK,
                    rusqlite::params![
                        title,
                        description,
                        status,
                        project_id,
                        user_id,
                        data,
                        attachments,
                        comments,
                        tags,
                        labels,
                        assignees,
                        priority,
                        kind,
                        subtasks,
                        due_date,
                        now,
                        now
                    ],
                )
                .map_err(wrap_err)?;

                let id = conn.last_insert_rowid();
                let mut stmt = conn.prepare(schema::SELECT_TASK_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_task).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Task", input.title))
    }

    async fn update_task(&self, id: i64, patch: TaskPatch) -> Result<Task> {
        let set = task_update_set(patch)?;
        let (sql, params) = set.into_query("tasks", id, format_datetime(&Utc::now()))?;

        self.conn
            .call(move |conn| {
                conn.execute(
                    &sql,
                    rusqlite::params_from_iter(params.iter().map(sql_param_value)),
                )
                .map_err(wrap_err)?;

                let mut stmt = conn.prepare(schema::SELECT_TASK_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_task).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Task", id.to_string()))
    }

    async fn delete_task(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn.execute(schema::DELETE_TASK, [id]).map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Task", id.to_string()))
    }

    async fn find_task_in_project(
        &self,
        project_slug: &str,
        task_id: i64,
    ) -> Result<Option<Task>> {
        let project_slug = project_slug.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_TASK_BY_ID_AND_PROJECT_SLUG)
                    .map_err(wrap_err)?;
                match stmt.query_row(rusqlite::params![task_id, project_slug], row_to_task) {
                    Ok(task) => Ok(Some(task)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// SprintRepository implementation
// ============================================================================

#[async_trait]
impl SprintRepository for SqliteRepository {
    async fn list_sprints(&self) -> Result<Vec<Sprint>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_SPRINTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_sprint).map_err(wrap_err)?;

                let mut sprints = Vec::new();
                for row_result in rows {
                    sprints.push(row_result.map_err(wrap_err)?);
                }
                Ok(sprints)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_sprint(&self, input: NewSprint) -> Result<Sprint> {
        let name = input.name.clone();
        let description = input.description;
        let status = input.status.unwrap_or(0);
        let user_id = input.user_id;
        let data = json_to_text(&input.data)?;
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_SPRINT,
                    rusqlite::params![name, description, status, user_id, data, now, now],
                )
                .map_err(wrap_err)?;

                let id = conn.last_insert_rowid();
                let mut stmt = conn.prepare(schema::SELECT_SPRINT_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_sprint).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Sprint", input.name))
    }

    async fn update_sprint(&self, id: i64, patch: SprintPatch) -> Result<Sprint> {
        let set = sprint_update_set(patch)?;
        let (sql, params) = set.into_query("sprints", id, format_datetime(&Utc::now()))?;

        self.conn
            .call(move |conn| {
                conn.execute(
                    &sql,
                    rusqlite::params_from_iter(params.iter().map(sql_param_value)),
                )
                .map_err(wrap_err)?;

                let mut stmt = conn.prepare(schema::SELECT_SPRINT_BY_ID).map_err(wrap_err)?;
                stmt.query_row([id], row_to_sprint).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Sprint", id.to_string()))
    }

    async fn delete_sprint(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_SPRINT, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Sprint", id.to_string()))
    }
}

// ============================================================================
// DataRepository implementation
// ============================================================================

#[async_trait]
impl DataRepository for SqliteRepository {
    async fn list_records(&self) -> Result<Vec<DataRecord>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_DATA_RECORDS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_data_record).map_err(wrap_err)?;

                let mut records = Vec::new();
                for row_result in rows {
                    records.push(row_result.map_err(wrap_err)?);
                }
                Ok(records)
            })
            .await
            .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }

    async fn create_record(&self, input: NewDataRecord) -> Result<DataRecord> {
        let name = input.name.clone();
        let data = json_to_text(&input.data)?;
        let status = input.status.unwrap_or(0);
        let user_id = input.user_id;
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_DATA_RECORD,
                    rusqlite::params![name, data, status, user_id, now, now],
                )
                .map_err(wrap_err)?;

                let id = conn.last_insert_rowid();
                let mut stmt = conn
                    .prepare(schema::SELECT_DATA_RECORD_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([id], row_to_data_record).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "DataRecord", input.name))
    }

    async fn update_record(&self, id: i64, patch: DataRecordPatch) -> Result<DataRecord> {
        let set = data_record_update_set(patch)?;
        let (sql, params) = set.into_query("data", id, format_datetime(&Utc::now()))?;

        self.conn
            .call(move |conn| {
                conn.execute(
                    &sql,
                    rusqlite::params_from_iter(params.iter().map(sql_param_value)),
                )
                .map_err(wrap_err)?;

                let mut stmt = conn
                    .prepare(schema::SELECT_DATA_RECORD_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([id], row_to_data_record).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "DataRecord", id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doable_core::auth::verify_password;

    async fn repo() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: "password".to_string(),
            username: Some("admin".to_string()),
            role: None,
            avatar: None,
            status: None,
            data: None,
        }
    }

    fn new_task(title: &str, project_id: i64, user_id: i64) -> NewTask {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "project_id": project_id,
            "user_id": user_id,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_user_applies_defaults() {
        let repo = repo().await;
        let user = repo.create_user(new_user("a@example.com")).await.unwrap();

        assert_eq!(user.role, "user");
        assert_eq!(user.status, "active");
        assert_eq!(user.data, serde_json::json!({}));
        assert_eq!(user.username.as_deref(), Some("admin"));
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let repo = repo().await;
        repo.create_user(new_user("a@example.com")).await.unwrap();

        let credentials = repo
            .find_by_email("a@example.com")
            .await
            .unwrap()
            .expect("user should exist");
        assert_ne!(credentials.password_hash, "password");
        assert!(verify_password("password", &credentials.password_hash));
    }

    #[tokio::test]
    async fn test_update_user_rehashes_password() {
        let repo = repo().await;
        let user = repo.create_user(new_user("a@example.com")).await.unwrap();

        repo.update_user(
            user.id,
            UserPatch {
                password: Some("changed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let credentials = repo.find_by_email("a@example.com").await.unwrap().unwrap();
        assert!(verify_password("changed", &credentials.password_hash));
        assert!(!verify_password("password", &credentials.password_hash));
    }

    #[tokio::test]
    async fn test_update_user_partial_leaves_other_fields() {
        let repo = repo().await;
        let user = repo.create_user(new_user("a@example.com")).await.unwrap();

        let updated = repo
            .update_user(
                user.id,
                UserPatch {
                    role: Some("admin".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.role, "admin");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.username, user.username);
        assert_eq!(updated.created_at, user.created_at);
    }

    #[tokio::test]
    async fn test_update_with_empty_patch_fails() {
        let repo = repo().await;
        let user = repo.create_user(new_user("a@example.com")).await.unwrap();

        let err = repo
            .update_user(user.id, UserPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_update_missing_id_is_not_found() {
        let repo = repo().await;
        let err = repo
            .update_user(
                999,
                UserPatch {
                    role: Some("admin".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_by_email_is_exact() {
        let repo = repo().await;
        repo.create_user(new_user("a@example.com")).await.unwrap();

        assert!(repo.find_by_email("a@example.com").await.unwrap().is_some());
        assert!(repo.find_by_email("A@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_task_applies_defaults_and_joins() {
        let repo = repo().await;
        let owner = repo.create_user(new_user("a@example.com")).await.unwrap();
        let project = repo
            .create_project(NewProject {
                name: "Site".to_string(),
                slug: "site".to_string(),
                owner_id: owner.id,
                description: None,
                status: None,
            })
            .await
            .unwrap();

        let task = repo
            .create_task(new_task("Ship it", project.id, owner.id))
            .await
            .unwrap();

        assert_eq!(task.status, 0);
        assert_eq!(task.priority, 0);
        assert_eq!(task.kind, "task");
        assert_eq!(task.tags, serde_json::json!({}));
        assert_eq!(task.project_name.as_deref(), Some("Site"));
        assert_eq!(task.user_name.as_deref(), Some("admin"));
        assert!(task.due_date.is_none());
    }

    #[tokio::test]
    async fn test_dangling_reference_yields_null_join() {
        let repo = repo().await;
        let task = repo.create_task(new_task("Orphan", 77, 88)).await.unwrap();

        assert_eq!(task.project_id, 77);
        assert!(task.project_name.is_none());
        assert!(task.user_name.is_none());
    }

    #[tokio::test]
    async fn test_sidecar_round_trip_preserves_arrays() {
        let repo = repo().await;
        let task = repo.create_task(new_task("Tagged", 1, 1)).await.unwrap();

        let updated = repo
            .update_task(
                task.id,
                TaskPatch {
                    tags: Some(serde_json::json!(["a", "b"])),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.tags, serde_json::json!(["a", "b"]));

        let listed = repo.list_tasks().await.unwrap();
        assert_eq!(listed[0].tags, serde_json::json!(["a", "b"]));
    }

    #[tokio::test]
    async fn test_delete_task_twice() {
        let repo = repo().await;
        let task = repo.create_task(new_task("Gone", 1, 1)).await.unwrap();

        repo.delete_task(task.id).await.unwrap();
        let err = repo.delete_task(task.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_find_task_in_project() {
        let repo = repo().await;
        let owner = repo.create_user(new_user("a@example.com")).await.unwrap();
        let project = repo
            .create_project(NewProject {
                name: "My Project".to_string(),
                slug: "my-project".to_string(),
                owner_id: owner.id,
                description: None,
                status: None,
            })
            .await
            .unwrap();
        let task = repo
            .create_task(new_task("Slugged", project.id, owner.id))
            .await
            .unwrap();

        let found = repo
            .find_task_in_project("my-project", task.id)
            .await
            .unwrap()
            .expect("task should match its project slug");
        assert_eq!(found.id, task.id);
        assert_eq!(found.project_slug.as_deref(), Some("my-project"));

        // Same id, wrong project slug: no match.
        assert!(repo
            .find_task_in_project("other", task.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let repo = repo().await;
        repo.create_sprint(NewSprint {
            name: "first".to_string(),
            user_id: 1,
            description: None,
            status: None,
            data: serde_json::json!({}),
        })
        .await
        .unwrap();
        // Two inserts can land on the same timestamp, so only the count is
        // asserted, not the order between these rows.
        repo.create_sprint(NewSprint {
            name: "second".to_string(),
            user_id: 1,
            description: None,
            status: None,
            data: serde_json::json!({}),
        })
        .await
        .unwrap();

        let sprints = repo.list_sprints().await.unwrap();
        assert_eq!(sprints.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_record_name_already_exists() {
        let repo = repo().await;
        repo.create_record(NewDataRecord {
            name: "settings".to_string(),
            user_id: 1,
            data: serde_json::json!({}),
            status: None,
        })
        .await
        .unwrap();

        let err = repo
            .create_record(NewDataRecord {
                name: "settings".to_string(),
                user_id: 1,
                data: serde_json::json!({}),
                status: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists { .. }));
    }

    #[tokio::test]
    async fn test_update_record_stamps_updated_at() {
        let repo = repo().await;
        let record = repo
            .create_record(NewDataRecord {
                name: "settings".to_string(),
                user_id: 1,
                data: serde_json::json!({}),
                status: None,
            })
            .await
            .unwrap();

        let updated = repo
            .update_record(
                record.id,
                DataRecordPatch {
                    status: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.status, 1);
        assert!(updated.updated_at >= record.updated_at);
    }
}
