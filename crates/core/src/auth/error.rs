use thiserror::Error;

/// Errors produced by the credential check.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email and wrong password intentionally share one message so
    /// the response never discloses which of the two failed.
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Maps an [`AuthError`] to an HTTP status code.
pub fn auth_error_to_status_code(error: &AuthError) -> u16 {
    match error {
        AuthError::InvalidCredentials => 401,
        AuthError::Hashing(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid email or password"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(auth_error_to_status_code(&AuthError::InvalidCredentials), 401);
        assert_eq!(
            auth_error_to_status_code(&AuthError::Hashing("rng".to_string())),
            500
        );
    }
}
