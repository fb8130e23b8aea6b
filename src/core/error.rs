//! Error types for the session layer

/// Errors returned by identity-changing operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Backend rejected the email/password pair. Deliberately does not say
    /// which of the two was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("This account has not been verified yet")]
    AccountNotVerified,

    #[error("{message}")]
    Validation { field: String, message: String },

    #[error("Service unavailable, please try again ({0})")]
    BackendUnavailable(String),

    /// Stored session could not be parsed. Handled inside the session store
    /// and never returned to callers of the provider.
    #[error("Stored session is corrupt")]
    CorruptSession,

    #[error("Another sign-in request is already in progress")]
    ConcurrentAuthOperation,

    #[error("Session is still initializing")]
    NotInitialized,
}

impl AuthError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AuthError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Field name for per-field display, if this is a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            AuthError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// Whether the UI should offer a retry
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuthError::BackendUnavailable(_) | AuthError::ConcurrentAuthOperation
        )
    }
}

/// Failure of the underlying key-value storage
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage is not available")]
    Unavailable,

    #[error("Storage operation failed: {0}")]
    Operation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_accessor() {
        let err = AuthError::validation("department_id", "Department is required");
        assert_eq!(err.field(), Some("department_id"));
        assert_eq!(err.to_string(), "Department is required");
        assert_eq!(AuthError::InvalidCredentials.field(), None);
    }

    #[test]
    fn test_retryable() {
        assert!(AuthError::BackendUnavailable("timeout".to_string()).is_retryable());
        assert!(!AuthError::InvalidCredentials.is_retryable());
        assert!(!AuthError::validation("email", "bad").is_retryable());
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        let msg = AuthError::InvalidCredentials.to_string();
        assert!(!msg.contains("not found"));
        assert!(!msg.contains("unknown"));
    }
}
