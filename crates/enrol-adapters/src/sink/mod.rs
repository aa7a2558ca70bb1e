//! Registration sink adapters.

mod log;
mod memory;

pub use log::LogSink;
pub use memory::MemorySink;
