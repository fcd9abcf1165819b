use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("query failed: {0}")]
    QueryFailed(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Task",
            id: "42".to_string(),
        };
        assert_eq!(error.to_string(), "Task not found: 42");
    }

    #[test]
    fn test_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "DataRecord",
            id: "settings".to_string(),
        };
        assert_eq!(error.to_string(), "DataRecord already exists: settings");
    }

    #[test]
    fn test_invalid_request_display() {
        let error = RepositoryError::InvalidRequest("no fields to update".to_string());
        assert_eq!(error.to_string(), "invalid request: no fields to update");
    }

    #[test]
    fn test_query_failed_display() {
        let error = RepositoryError::QueryFailed("syntax error".to_string());
        assert_eq!(error.to_string(), "query failed: syntax error");
    }
}
