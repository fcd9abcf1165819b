//! Domain types and request payloads.
//!
//! Each entity module defines the read projection returned by the API, a
//! `New*` payload for creation and a `*Patch` payload for partial updates.
//! Patch payloads reject unknown keys so a typo never degrades into a
//! silently ignored field.

mod project;
mod record;
mod sprint;
mod task;
mod user;

pub use project::{NewProject, Project, ProjectPatch};
pub use record::{DataRecord, DataRecordPatch, NewDataRecord};
pub use sprint::{NewSprint, Sprint, SprintPatch};
pub use task::{parse_task_slug, NewTask, Task, TaskPatch};
pub use user::{NewUser, User, UserCredentials, UserPatch};

/// Default value for sidecar columns: an empty JSON object.
pub(crate) fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}
