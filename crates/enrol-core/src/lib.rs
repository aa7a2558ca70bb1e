//! Enrol Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Enrol
//! student registration form, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            enrol-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (RegistrationForm, LiveReload)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FieldPresenter, Banner, Sink, Clock,   │
//! │  Scheduler, ReloadTarget)               │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     enrol-adapters (Infrastructure)     │
//! │ (MemoryPresenter, TokioScheduler, ...)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │   (FieldId, rules, RegistrationRecord)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use enrol_core::{
//!     application::RegistrationForm,
//!     domain::FieldId,
//! };
//!
//! // 1. Wire the form with injected adapters
//! let form = RegistrationForm::builder()
//!     .presenter(FieldId::StudentName, name_presenter)
//!     .banner(banner)
//!     .sink(sink)
//!     .clock(clock)
//!     .scheduler(scheduler)
//!     .build()
//!     .unwrap();
//!
//! // 2. Feed user input, then submit
//! form.on_input(FieldId::StudentName, "Ada Lovelace");
//! let outcome = form.submit().unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        LiveReload, RegistrationForm, SubmitOutcome,
        ports::{
            Banner, Clock, FieldPresenter, RegistrationSink, ReloadTarget, ScheduledTask,
            Scheduler,
        },
    };
    pub use crate::domain::{
        FieldError, FieldId, FormValues, RegistrationRecord, ReloadCommand, Trigger,
    };
    pub use crate::error::{EnrolError, EnrolResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
