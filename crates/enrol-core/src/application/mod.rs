//! Application layer for Enrol.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (RegistrationForm, LiveReload)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer drives presenters and adapters but contains no
//! field rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    LiveReload, RegistrationForm, RegistrationFormBuilder, SUCCESS_MESSAGE, SubmitOutcome,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Banner, Clock, FieldPresenter, Receipt, RegistrationSink, ReloadTarget, ScheduledTask,
    Scheduler, Task,
};

pub use error::ApplicationError;
