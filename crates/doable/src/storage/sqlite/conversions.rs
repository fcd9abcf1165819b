//! SQLite row and value conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types, and
//! for mapping sparse patches onto the update builder. Testable in
//! isolation without database access.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use doable_core::model::{
    DataRecord, DataRecordPatch, Project, ProjectPatch, Sprint, SprintPatch, Task, TaskPatch,
    User, UserCredentials, UserPatch,
};
use doable_core::storage::{RepositoryError, Result, SqlParam, UpdateSet};

// ============================================================================
// Row conversions
// ============================================================================

/// Convert a SQLite row to a User.
///
/// Expected columns: id, username, email, role, avatar, status, data,
/// created_at, updated_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let data: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        role: row.get(3)?,
        avatar: row.get(4)?,
        status: row.get(5)?,
        data: parse_json(&data)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a row with a trailing password column to UserCredentials.
///
/// Expected columns: the user projection above, then password.
pub fn row_to_credentials(row: &Row) -> rusqlite::Result<UserCredentials> {
    Ok(UserCredentials {
        user: row_to_user(row)?,
        password_hash: row.get(9)?,
    })
}

/// Convert a SQLite row to a Project.
///
/// Expected columns: id, name, slug, description, owner_id, status,
/// owner_name, created_at, updated_at
pub fn row_to_project(row: &Row) -> rusqlite::Result<Project> {
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        description: row.get(3)?,
        owner_id: row.get(4)?,
        status: row.get(5)?,
        owner_name: row.get(6)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Task, deserializing the seven sidecar columns.
///
/// Expected columns: id, title, description, status, project_id, user_id,
/// data, attachments, comments, tags, labels, assignees, subtasks,
/// priority, type, due_date, project_name, project_slug, user_name,
/// created_at, updated_at
pub fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    let data: String = row.get(6)?;
    let attachments: String = row.get(7)?;
    let comments: String = row.get(8)?;
    let tags: String = row.get(9)?;
    let labels: String = row.get(10)?;
    let assignees: String = row.get(11)?;
    let subtasks: String = row.get(12)?;
    let due_date: Option<String> = row.get(15)?;
    let created_at: String = row.get(19)?;
    let updated_at: String = row.get(20)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        project_id: row.get(4)?,
        user_id: row.get(5)?,
        data: parse_json(&data)?,
        attachments: parse_json(&attachments)?,
        comments: parse_json(&comments)?,
        tags: parse_json(&tags)?,
        labels: parse_json(&labels)?,
        assignees: parse_json(&assignees)?,
        subtasks: parse_json(&subtasks)?,
        priority: row.get(13)?,
        kind: row.get(14)?,
        due_date: due_date.as_deref().map(parse_datetime).transpose()?,
        project_name: row.get(16)?,
        project_slug: row.get(17)?,
        user_name: row.get(18)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a Sprint.
///
/// Expected columns: id, name, description, status, user_id, data,
/// user_name, created_at, updated_at
pub fn row_to_sprint(row: &Row) -> rusqlite::Result<Sprint> {
    let data: String = row.get(5)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(Sprint {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        user_id: row.get(4)?,
        data: parse_json(&data)?,
        user_name: row.get(6)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

/// Convert a SQLite row to a DataRecord.
///
/// Expected columns: id, name, data, status, user_id, user_name,
/// created_at, updated_at
pub fn row_to_data_record(row: &Row) -> rusqlite::Result<DataRecord> {
    let data: String = row.get(2)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(DataRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        data: parse_json(&data)?,
        status: row.get(3)?,
        user_id: row.get(4)?,
        user_name: row.get(5)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: parse_datetime(&updated_at)?,
    })
}

// ============================================================================
// Patch -> UpdateSet mappings (the per-entity column whitelists)
// ============================================================================

/// Map a user patch onto the update builder.
///
/// The password must already be hashed by the caller.
pub fn user_update_set(patch: UserPatch) -> Result<UpdateSet> {
    let mut set = UpdateSet::new();
    set.push_text("username", patch.username);
    set.push_text("email", patch.email);
    set.push_text("role", patch.role);
    set.push_text("password", patch.password);
    set.push_text("avatar", patch.avatar);
    set.push_text("status", patch.status);
    set.push_json("data", patch.data.as_ref())?;
    Ok(set)
}

/// Map a project patch onto the update builder.
pub fn project_update_set(patch: ProjectPatch) -> Result<UpdateSet> {
    let mut set = UpdateSet::new();
    set.push_text("name", patch.name);
    set.push_text("slug", patch.slug);
    set.push_text("description", patch.description);
    set.push_integer("owner_id", patch.owner_id);
    set.push_text("status", patch.status);
    Ok(set)
}

/// Map a task patch onto the update builder.
pub fn task_update_set(patch: TaskPatch) -> Result<UpdateSet> {
    let mut set = UpdateSet::new();
    set.push_text("title", patch.title);
    set.push_text("description", patch.description);
    set.push_integer("status", patch.status);
    set.push_integer("project_id", patch.project_id);
    set.push_integer("user_id", patch.user_id);
    set.push_json("data", patch.data.as_ref())?;
    set.push_json("attachments", patch.attachments.as_ref())?;
    set.push_json("comments", patch.comments.as_ref())?;
    set.push_json("tags", patch.tags.as_ref())?;
    set.push_json("labels", patch.labels.as_ref())?;
    set.push_json("assignees", patch.assignees.as_ref())?;
    set.push_json("subtasks", patch.subtasks.as_ref())?;
    set.push_integer("priority", patch.priority);
    set.push_text("type", patch.kind);
    set.push_text("due_date", patch.due_date.as_ref().map(format_datetime));
    Ok(set)
}

/// Map a sprint patch onto the update builder.
pub fn sprint_update_set(patch: SprintPatch) -> Result<UpdateSet> {
    let mut set = UpdateSet::new();
    set.push_text("name", patch.name);
    set.push_text("description", patch.description);
    set.push_integer("status", patch.status);
    set.push_integer("user_id", patch.user_id);
    set.push_json("data", patch.data.as_ref())?;
    Ok(set)
}

/// Map a data record patch onto the update builder.
pub fn data_record_update_set(patch: DataRecordPatch) -> Result<UpdateSet> {
    let mut set = UpdateSet::new();
    set.push_text("name", patch.name);
    set.push_json("data", patch.data.as_ref())?;
    set.push_integer("status", patch.status);
    set.push_integer("user_id", patch.user_id);
    Ok(set)
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a datetime from RFC 3339 text.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Parse a sidecar column from its serialized JSON text.
fn parse_json(s: &str) -> rusqlite::Result<serde_json::Value> {
    serde_json::from_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Format a DateTime<Utc> for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Serialize a sidecar value for an INSERT bind.
pub fn json_to_text(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Convert a builder bind value into a rusqlite value.
pub fn sql_param_value(param: &SqlParam) -> rusqlite::types::Value {
    match param {
        SqlParam::Integer(i) => rusqlite::types::Value::Integer(*i),
        SqlParam::Text(s) => rusqlite::types::Value::Text(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_parse_datetime_round_trip() {
        let dt = DateTime::parse_from_rfc3339("2024-06-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let text = format_datetime(&dt);
        assert_eq!(parse_datetime(&text).unwrap(), dt);
    }

    #[test]
    fn test_parse_datetime_invalid() {
        assert!(parse_datetime("not-a-datetime").is_err());
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(parse_json("{not json").is_err());
        assert_eq!(parse_json("{}").unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_empty_user_patch_yields_no_assignments() {
        let set = user_update_set(UserPatch::default()).unwrap();
        assert!(set.into_query("users", 1, "now".to_string()).is_err());
    }

    #[test]
    fn test_task_patch_whitelist_serializes_sidecars() {
        let patch = TaskPatch {
            tags: Some(serde_json::json!(["a", "b"])),
            status: Some(2),
            ..Default::default()
        };
        let set = task_update_set(patch).unwrap();
        let (sql, params) = set.into_query("tasks", 5, "now".to_string()).unwrap();

        assert_eq!(
            sql,
            "UPDATE tasks SET status = ?, tags = ?, updated_at = ? WHERE id = ?"
        );
        assert_eq!(params[1], SqlParam::Text(r#"["a","b"]"#.to_string()));
    }

    #[test]
    fn test_data_record_patch_whitelist() {
        let patch = DataRecordPatch {
            name: Some("settings".to_string()),
            status: Some(1),
            ..Default::default()
        };
        let set = data_record_update_set(patch).unwrap();
        let (sql, _) = set.into_query("data", 2, "now".to_string()).unwrap();
        assert_eq!(
            sql,
            "UPDATE data SET name = ?, status = ?, updated_at = ? WHERE id = ?"
        );
    }
}
