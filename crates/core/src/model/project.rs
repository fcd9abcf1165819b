use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project, joined with the owning user's name at read time.
///
/// `owner_id` is an advisory reference: a dangling id is permitted and
/// simply yields a null `owner_name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub status: String,
    pub owner_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a project.
#[derive(Debug, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub slug: String,
    pub owner_id: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Sparse patch for a project.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<i64>,
    pub status: Option<String>,
}
