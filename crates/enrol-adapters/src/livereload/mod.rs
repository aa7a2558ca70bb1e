//! Live-reload adapters: the socket listener and an in-memory page.

mod page;
mod ws;

pub use page::MemoryPage;
pub use ws::{ListenSummary, WsListener};
