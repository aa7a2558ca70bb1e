//! Infrastructure adapters for Enrol.
//!
//! This crate implements the ports defined in `enrol-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod clock;
pub mod livereload;
pub mod presenter;
pub mod scheduler;
pub mod sink;

// Re-export commonly used adapters
pub use clock::{FixedClock, SystemClock};
pub use livereload::{ListenSummary, MemoryPage, WsListener};
pub use presenter::{MemoryBanner, MemoryPresenter};
pub use scheduler::{ManualScheduler, TokioScheduler};
pub use sink::{LogSink, MemorySink};
