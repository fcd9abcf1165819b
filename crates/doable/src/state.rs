//! Application state shared by all request handlers.
//!
//! One `SqliteRepository` is constructed at startup and exposed through
//! repository trait objects, one per entity; the same `Arc` backs all of
//! them. Handlers never open connections themselves.

use std::sync::Arc;

use doable_core::storage::{
    DataRepository, ProjectRepository, SprintRepository, TaskRepository, UserRepository,
};

use crate::config::Config;
use crate::storage::s3::ObjectStore;
use crate::storage::SqliteRepository;

/// Shared application state, cloned per request handler.
#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub task_repo: Arc<dyn TaskRepository>,
    pub sprint_repo: Arc<dyn SprintRepository>,
    pub data_repo: Arc<dyn DataRepository>,
    /// `None` when object storage is unconfigured; uploads then fail with
    /// a 500 explaining the missing settings.
    pub object_store: Option<Arc<ObjectStore>>,
}

impl AppState {
    /// Creates the state for the given configuration, opening the database
    /// and (when configured) the object storage client.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);

        let object_store = match &config.s3 {
            Some(s3) => Some(Arc::new(ObjectStore::new(s3).await)),
            None => {
                tracing::warn!("object storage not configured; uploads disabled");
                None
            }
        };

        Ok(Self::from_repository(repo, object_store))
    }

    fn from_repository(
        repo: Arc<SqliteRepository>,
        object_store: Option<Arc<ObjectStore>>,
    ) -> Self {
        Self {
            user_repo: repo.clone(),
            project_repo: repo.clone(),
            task_repo: repo.clone(),
            sprint_repo: repo.clone(),
            data_repo: repo,
            object_store,
        }
    }

    /// Creates state backed by an in-memory database, without object
    /// storage. Test builds only.
    #[cfg(test)]
    pub async fn for_tests() -> Self {
        let repo = Arc::new(
            SqliteRepository::new_in_memory()
                .await
                .expect("in-memory database should open"),
        );
        Self::from_repository(repo, None)
    }
}
