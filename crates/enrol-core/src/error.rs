//! Unified error handling for Enrol Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Enrol Core operations.
///
/// This enum wraps all possible errors that can occur when using enrol-core,
/// providing a unified interface for error handling.
#[derive(Debug, Error, Clone)]
pub enum EnrolError {
    /// Errors from the domain layer (rule violations, bad input).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (adapter failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl EnrolError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in Enrol".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Application(ApplicationError::ConnectionFailed { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type EnrolResult<T> = Result<T, EnrolError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> EnrolResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> EnrolResult<T> {
        self.map_err(|e| EnrolError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldError, FieldId};

    #[test]
    fn field_errors_are_validation() {
        let err: EnrolError = DomainError::from(FieldError::new(FieldId::Email, "x")).into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.is_retryable());
    }

    #[test]
    fn connection_failures_are_retryable() {
        let err: EnrolError = ApplicationError::ConnectionFailed {
            url: "ws://localhost/ws".into(),
            reason: "refused".into(),
        }
        .into();
        assert!(err.is_retryable());
    }

    #[test]
    fn context_wraps_as_internal() {
        let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = result.context("formatting").unwrap_err();
        assert!(matches!(err, EnrolError::Internal { .. }));
        assert!(err.to_string().contains("formatting"));
    }
}
