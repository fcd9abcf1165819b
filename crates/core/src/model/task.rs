use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::empty_object;

/// A task, joined with its project and assigned user at read time.
///
/// The seven `serde_json::Value` fields are sidecar columns: stored as
/// serialized JSON, deserialized at the API boundary, free-form inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub data: serde_json::Value,
    pub attachments: serde_json::Value,
    pub comments: serde_json::Value,
    pub tags: serde_json::Value,
    pub labels: serde_json::Value,
    pub assignees: serde_json::Value,
    pub subtasks: serde_json::Value,
    pub priority: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: Option<DateTime<Utc>>,
    pub project_name: Option<String>,
    pub project_slug: Option<String>,
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a task.
#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub project_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
    #[serde(default = "empty_object")]
    pub attachments: serde_json::Value,
    #[serde(default = "empty_object")]
    pub comments: serde_json::Value,
    #[serde(default = "empty_object")]
    pub tags: serde_json::Value,
    #[serde(default = "empty_object")]
    pub labels: serde_json::Value,
    #[serde(default = "empty_object")]
    pub assignees: serde_json::Value,
    #[serde(default = "empty_object")]
    pub subtasks: serde_json::Value,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Sparse patch for a task.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<i64>,
    pub project_id: Option<i64>,
    pub user_id: Option<i64>,
    pub data: Option<serde_json::Value>,
    pub attachments: Option<serde_json::Value>,
    pub comments: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    pub labels: Option<serde_json::Value>,
    pub assignees: Option<serde_json::Value>,
    pub subtasks: Option<serde_json::Value>,
    pub priority: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Splits a composite task slug of the form `{project-slug}-{task-id}`.
///
/// Project slugs may themselves contain hyphens, so the split happens on
/// the last hyphen in the string. Returns `None` when there is no hyphen
/// or the trailing segment is not a numeric id.
pub fn parse_task_slug(slug: &str) -> Option<(&str, i64)> {
    let (project_slug, id) = slug.rsplit_once('-')?;
    let task_id = id.parse().ok()?;
    Some((project_slug, task_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_slug_splits_on_last_hyphen() {
        assert_eq!(parse_task_slug("my-project-42"), Some(("my-project", 42)));
        assert_eq!(parse_task_slug("site-7"), Some(("site", 7)));
    }

    #[test]
    fn test_parse_task_slug_without_hyphen() {
        assert_eq!(parse_task_slug("abc"), None);
    }

    #[test]
    fn test_parse_task_slug_non_numeric_id() {
        assert_eq!(parse_task_slug("my-project-final"), None);
        assert_eq!(parse_task_slug("dangling-"), None);
    }

    #[test]
    fn test_new_task_defaults() {
        let task: NewTask =
            serde_json::from_str(r#"{"title": "t", "project_id": 1, "user_id": 2}"#).unwrap();
        assert_eq!(task.tags, serde_json::json!({}));
        assert_eq!(task.subtasks, serde_json::json!({}));
        assert!(task.status.is_none());
        assert!(task.kind.is_none());
    }

    #[test]
    fn test_task_kind_renames_to_type() {
        let patch: TaskPatch = serde_json::from_str(r#"{"type": "bug"}"#).unwrap();
        assert_eq!(patch.kind.as_deref(), Some("bug"));
    }
}
