//! Domain layer: pure registration-form logic.
//!
//! - [`field`]: the seven fields and their validation triggers
//! - [`rules`]: patterns, messages and pure checks, one per field
//! - [`record`]: raw form values and the validated [`RegistrationRecord`]
//! - [`livereload`]: dev-server signals, endpoint derivation, cache busting
//!
//! Nothing in here performs I/O or knows how errors are displayed.

pub mod error;
pub mod field;
pub mod livereload;
pub mod record;
pub mod rules;

pub use error::{DomainError, ErrorCategory, FieldError};
pub use field::{FieldId, Trigger};
pub use livereload::{ReloadCommand, StylesheetLink, cache_bust, endpoint_for, refresh_stylesheets};
pub use record::{FormValues, RegistrationRecord};
