// ============================================================================
// domain/error.rs - FIELD VALIDATION AND DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::field::FieldId;

/// A single field failed its rule.
///
/// This is the only validation failure kind: it names the field and carries
/// the fixed, user-facing message for that rule.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{message}")]
pub struct FieldError {
    pub field: FieldId,
    pub message: &'static str,
}

impl FieldError {
    pub const fn new(field: FieldId, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (cheap to hand to presenters and logs)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("{field}: {}", .source.message)]
    Field {
        field: FieldId,
        #[source]
        source: FieldError,
    },

    #[error("Form has {count} invalid field(s)")]
    InvalidForm { count: usize },

    // ========================================================================
    // Lookup Errors
    // ========================================================================
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    // ========================================================================
    // Live-reload Errors
    // ========================================================================
    #[error("Invalid page URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<FieldError> for DomainError {
    fn from(source: FieldError) -> Self {
        Self::Field {
            field: source.field,
            source,
        }
    }
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Field { field, source } => vec![
                format!("{} is invalid", field.label()),
                source.message.to_string(),
            ],
            Self::InvalidForm { .. } => vec![
                "Fix the fields marked above and submit again".into(),
            ],
            Self::UnknownField(name) => vec![
                format!("'{name}' is not a form field"),
                format!(
                    "Known fields: {}",
                    FieldId::ALL
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ],
            Self::InvalidUrl { .. } => vec![
                "Use the full page address, e.g. http://127.0.0.1:5500/index.html".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Field { .. } | Self::InvalidForm { .. } => ErrorCategory::Validation,
            Self::UnknownField(_) => ErrorCategory::NotFound,
            Self::InvalidUrl { .. } => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_displays_its_message() {
        let err = FieldError::new(FieldId::Gender, "Gender is required.");
        assert_eq!(err.to_string(), "Gender is required.");
    }

    #[test]
    fn field_error_converts_into_domain_error() {
        let err: DomainError = FieldError::new(FieldId::Course, "Course Enrolled is required.").into();
        assert!(matches!(err, DomainError::Field { field: FieldId::Course, .. }));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn unknown_field_lists_known_fields() {
        let err = DomainError::UnknownField("age".into());
        assert!(err.suggestions().iter().any(|s| s.contains("studentName")));
    }
}
