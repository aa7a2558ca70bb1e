//! Application layer errors.
//!
//! These errors represent failures in orchestration and adapters, not field
//! rules. Rule violations are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The registration sink rejected or failed to take the record.
    #[error("Registration could not be transmitted: {reason}")]
    SinkFailed { reason: String },

    /// The scheduler cannot run deferred tasks (no runtime, shut down).
    #[error("Scheduler unavailable: {reason}")]
    SchedulerUnavailable { reason: String },

    /// Adapter state lock was poisoned.
    #[error("Adapter state lock poisoned: {name}")]
    LockError { name: &'static str },

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },

    /// Live-reload socket could not be opened or broke.
    #[error("Live-reload connection to {url} failed: {reason}")]
    ConnectionFailed { url: String, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SinkFailed { reason } => vec![
                format!("Transmission failed: {}", reason),
                "The form was left as entered; submit again".into(),
            ],
            Self::SchedulerUnavailable { .. } => vec![
                "Deferred tasks need a running async runtime".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "This is likely a wiring error".into(),
            ],
            Self::ConnectionFailed { url, .. } => vec![
                format!("Could not reach {}", url),
                "Make sure the live-reload dev server is running".into(),
                "Check the page URL passed with --url".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SinkFailed { .. } => ErrorCategory::Internal,
            Self::SchedulerUnavailable { .. } | Self::LockError { .. } => ErrorCategory::Internal,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
            Self::ConnectionFailed { .. } => ErrorCategory::NotFound,
        }
    }
}
