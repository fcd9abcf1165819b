use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::empty_object;

/// A generic named data record. `name` is unique at the column level, the
/// only database-enforced uniqueness in the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: i64,
    pub name: String,
    pub data: serde_json::Value,
    pub status: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a data record.
#[derive(Debug, Deserialize)]
pub struct NewDataRecord {
    pub name: String,
    pub user_id: i64,
    #[serde(default = "empty_object")]
    pub data: serde_json::Value,
    #[serde(default)]
    pub status: Option<i64>,
}

/// Sparse patch for a data record.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataRecordPatch {
    pub name: Option<String>,
    pub data: Option<serde_json::Value>,
    pub status: Option<i64>,
    pub user_id: Option<i64>,
}
