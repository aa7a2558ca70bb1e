//! Live-reload dispatcher.
//!
//! Turns inbound socket payloads into actions on a [`ReloadTarget`]. The
//! socket itself belongs to an adapter; this service only decides what a
//! payload means.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, instrument};
use url::Url;

use crate::{
    application::ports::ReloadTarget,
    domain::{ReloadCommand, endpoint_for},
    error::EnrolResult,
};

static ANNOUNCED: AtomicBool = AtomicBool::new(false);

/// Dispatches live-reload signals to a page.
#[derive(Clone)]
pub struct LiveReload {
    target: Arc<dyn ReloadTarget>,
}

impl LiveReload {
    /// Wrap `target`. The first instance in a process logs that live reload
    /// is enabled.
    pub fn new(target: Arc<dyn ReloadTarget>) -> Self {
        if !ANNOUNCED.swap(true, Ordering::Relaxed) {
            info!("Live reload enabled.");
        }
        Self { target }
    }

    /// Socket endpoint for the page at `page_url`.
    pub fn endpoint(page_url: &str) -> EnrolResult<Url> {
        Ok(endpoint_for(page_url)?)
    }

    /// Act on one text payload. Returns the command acted on, or `None` for
    /// an unrecognized payload.
    #[instrument(skip(self))]
    pub fn handle_message(&self, payload: &str) -> Option<ReloadCommand> {
        let Some(command) = ReloadCommand::parse(payload) else {
            debug!("ignoring unrecognized payload");
            return None;
        };

        match command {
            ReloadCommand::Reload => self.target.reload(),
            ReloadCommand::RefreshCss => self.target.refresh_css(),
        }
        debug!(command = %command, "live-reload command applied");
        Some(command)
    }
}
