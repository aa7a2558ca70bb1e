//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `enrol-adapters` crate provides implementations.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::domain::RegistrationRecord;
use crate::error::EnrolResult;

/// Port for one field's error display region.
///
/// Implemented by:
/// - `enrol_adapters::presenter::MemoryPresenter` (testing)
/// - `enrol_cli` terminal presenter (interactive use)
///
/// ## Design Notes
///
/// - Scoped to a single field; never touches another field's region
/// - Infallible: a display that cannot update is not a form failure
pub trait FieldPresenter: Send + Sync {
    /// Show `message` and make the region visible.
    fn show_error(&self, message: &str);

    /// Hide the region.
    fn clear(&self);
}

/// Port for the form-level success message.
pub trait Banner: Send + Sync {
    fn show(&self, message: &str);

    fn hide(&self);
}

/// Acknowledgement returned by a [`RegistrationSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Identifier assigned to this submission by the sink.
    pub reference: String,
}

/// Port for handing off a validated record.
///
/// Implemented by:
/// - `enrol_adapters::sink::LogSink` (simulated transmission: structured log)
/// - `enrol_adapters::sink::MemorySink` (testing)
pub trait RegistrationSink: Send + Sync {
    fn transmit(&self, record: &RegistrationRecord) -> EnrolResult<Receipt>;
}

/// Port for the current instant (date-of-birth futurity check).
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a task handed to a [`Scheduler`].
pub trait ScheduledTask: Send + Sync {
    /// Prevent the task from running. No effect once it has run.
    fn cancel(&self);

    /// `true` once the task ran or was cancelled.
    fn is_finished(&self) -> bool;
}

/// Port for running a task after a delay.
///
/// Implemented by:
/// - `enrol_adapters::scheduler::TokioScheduler` (production)
/// - `enrol_adapters::scheduler::ManualScheduler` (testing, virtual time)
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: Task) -> EnrolResult<Box<dyn ScheduledTask>>;
}

/// Port for the page a live-reload signal acts on.
pub trait ReloadTarget: Send + Sync {
    /// Full page reload.
    fn reload(&self);

    /// Re-fetch stylesheets without reloading.
    fn refresh_css(&self);
}
