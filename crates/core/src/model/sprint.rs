use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::empty_object;

/// A sprint, joined with its user's name at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: i64,
    pub user_id: i64,
    pub data: serde_json::Value,
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a sprint.
#[derive(Debug, Deserialize)]
pub struct NewSprint {
    pub name: String,
    pub user_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
}

/// Sparse patch for a sprint.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SprintPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<i64>,
    pub user_id: Option<i64>,
    pub data: Option<serde_json::Value>,
}
