mod error;
mod http_mapping;
mod patch;
mod traits;

pub use error::{RepositoryError, Result};
pub use http_mapping::repository_error_to_status_code;
pub use patch::{SqlParam, UpdateSet};
pub use traits::{
    DataRepository, ProjectRepository, SprintRepository, TaskRepository, UserRepository,
};
