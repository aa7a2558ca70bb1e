//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `enrol-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `FieldPresenter`, `Banner`: error and success display
//!   - `RegistrationSink`: where a validated record goes
//!   - `Clock`, `Scheduler`: time and deferred work
//!   - `ReloadTarget`: the page a live-reload signal acts on
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{
    Banner, Clock, FieldPresenter, Receipt, RegistrationSink, ReloadTarget, ScheduledTask,
    Scheduler, Task,
};
