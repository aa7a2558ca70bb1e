//! Presenter adapters.

mod memory;

pub use memory::{MemoryBanner, MemoryPresenter};
