//! Scheduler adapters.

mod manual;
mod runtime;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;
