//! The partial-update builder.
//!
//! Update handlers receive sparse patches: only the fields present in the
//! request body may change. Each entity maps its patch onto an [`UpdateSet`]
//! through an explicit per-column whitelist (identity for scalars,
//! JSON-serialize for sidecar columns), and the builder assembles the
//! `SET` clause and ordered bind list. The builder is storage-agnostic;
//! the SQLite layer converts [`SqlParam`] values into driver types.

use super::{RepositoryError, Result};

/// A single bind value produced by the update builder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Integer(i64),
    Text(String),
}

/// Accumulates `column = ?` assignments for one UPDATE statement.
///
/// Absent patch fields are skipped by the `push_*` methods; present values
/// are always bound, so an empty string or `0` is a valid update.
#[derive(Debug, Default)]
pub struct UpdateSet {
    assignments: Vec<String>,
    params: Vec<SqlParam>,
}

impl UpdateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text assignment when the value is present.
    pub fn push_text(&mut self, column: &str, value: Option<String>) {
        if let Some(value) = value {
            self.push(column, SqlParam::Text(value));
        }
    }

    /// Appends an integer assignment when the value is present.
    pub fn push_integer(&mut self, column: &str, value: Option<i64>) {
        if let Some(value) = value {
            self.push(column, SqlParam::Integer(value));
        }
    }

    /// Appends a sidecar assignment when the value is present, serializing
    /// it to JSON text. The stored value is replaced wholesale; there is no
    /// merge with the column's prior content.
    pub fn push_json(&mut self, column: &str, value: Option<&serde_json::Value>) -> Result<()> {
        if let Some(value) = value {
            let serialized = serde_json::to_string(value)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
            self.push(column, SqlParam::Text(serialized));
        }
        Ok(())
    }

    fn push(&mut self, column: &str, param: SqlParam) {
        self.assignments.push(format!("{column} = ?"));
        self.params.push(param);
    }

    /// Finalizes the builder into an UPDATE statement and its bind list.
    ///
    /// Fails with `InvalidRequest` when no recognized field was supplied:
    /// the caller must not issue a no-op write. Otherwise stamps
    /// `updated_at` after the user-supplied fields and appends the row id
    /// as the final bind value for the WHERE clause.
    pub fn into_query(
        mut self,
        table: &str,
        id: i64,
        updated_at: String,
    ) -> Result<(String, Vec<SqlParam>)> {
        if self.assignments.is_empty() {
            return Err(RepositoryError::InvalidRequest(
                "no fields to update".to_string(),
            ));
        }

        self.push("updated_at", SqlParam::Text(updated_at));
        self.params.push(SqlParam::Integer(id));

        let sql = format!(
            "UPDATE {table} SET {} WHERE id = ?",
            self.assignments.join(", ")
        );
        Ok((sql, self.params))
    }
}
