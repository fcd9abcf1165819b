use async_trait::async_trait;

use crate::model::{
    DataRecord, DataRecordPatch, NewDataRecord, NewProject, NewSprint, NewTask, NewUser, Project,
    ProjectPatch, Sprint, SprintPatch, Task, TaskPatch, User, UserCredentials, UserPatch,
};

use super::Result;

/// Repository for user operations.
///
/// `create_user` and `update_user` hash a supplied plaintext password
/// before binding it; plaintext never reaches storage.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists all users, newest first.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Creates a user and returns the freshly inserted row.
    async fn create_user(&self, input: NewUser) -> Result<User>;

    /// Applies a sparse patch and returns the updated row.
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User>;

    /// Looks up a user with their password hash by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;

    /// Counts stored users (seed plugin and health probe).
    async fn count_users(&self) -> Result<i64>;
}

/// Repository for project operations.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Lists all projects, newest first, joined with the owner's name.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Creates a project and returns the inserted row with its join.
    async fn create_project(&self, input: NewProject) -> Result<Project>;

    /// Applies a sparse patch and returns the updated row with its join.
    async fn update_project(&self, id: i64, patch: ProjectPatch) -> Result<Project>;
}

/// Repository for task operations.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Lists all tasks, newest first, joined with project and user names.
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Creates a task and returns the inserted row with its joins.
    async fn create_task(&self, input: NewTask) -> Result<Task>;

    /// Applies a sparse patch and returns the updated row with its joins.
    async fn update_task(&self, id: i64, patch: TaskPatch) -> Result<Task>;

    /// Deletes a task; `NotFound` when the id does not resolve.
    async fn delete_task(&self, id: i64) -> Result<()>;

    /// Looks up a task by numeric id, constrained to the project whose
    /// slug matches. A dangling project reference never matches.
    async fn find_task_in_project(&self, project_slug: &str, task_id: i64)
        -> Result<Option<Task>>;
}

/// Repository for sprint operations.
#[async_trait]
pub trait SprintRepository: Send + Sync {
    /// Lists all sprints, newest first, joined with the user's name.
    async fn list_sprints(&self) -> Result<Vec<Sprint>>;

    /// Creates a sprint and returns the inserted row with its join.
    async fn create_sprint(&self, input: NewSprint) -> Result<Sprint>;

    /// Applies a sparse patch and returns the updated row with its join.
    async fn update_sprint(&self, id: i64, patch: SprintPatch) -> Result<Sprint>;

    /// Deletes a sprint; `NotFound` when the id does not resolve.
    async fn delete_sprint(&self, id: i64) -> Result<()>;
}

/// Repository for generic data record operations.
#[async_trait]
pub trait DataRepository: Send + Sync {
    /// Lists all records, newest first, joined with the user's name.
    async fn list_records(&self) -> Result<Vec<DataRecord>>;

    /// Creates a record; a duplicate name fails with `AlreadyExists`.
    async fn create_record(&self, input: NewDataRecord) -> Result<DataRecord>;

    /// Applies a sparse patch and returns the updated row with its join.
    async fn update_record(&self, id: i64, patch: DataRecordPatch) -> Result<DataRecord>;
}
