//! In-memory page: counts reloads and re-stamps stylesheet links.

use std::sync::{Arc, RwLock};

use enrol_core::{
    application::ports::{Clock, ReloadTarget},
    domain::{StylesheetLink, refresh_stylesheets},
};
use tracing::debug;

#[derive(Debug, Default)]
struct PageState {
    reloads: usize,
    links: Vec<StylesheetLink>,
}

/// Page model for headless use. Clones share state.
#[derive(Clone)]
pub struct MemoryPage {
    inner: Arc<RwLock<PageState>>,
    clock: Arc<dyn Clock>,
}

impl MemoryPage {
    pub fn new(links: Vec<StylesheetLink>, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(PageState { reloads: 0, links })),
            clock,
        }
    }

    /// Number of full reloads requested.
    pub fn reloads(&self) -> usize {
        self.inner.read().map(|s| s.reloads).unwrap_or(0)
    }

    /// Current links, in document order.
    pub fn links(&self) -> Vec<StylesheetLink> {
        self.inner
            .read()
            .map(|s| s.links.clone())
            .unwrap_or_default()
    }
}

impl ReloadTarget for MemoryPage {
    fn reload(&self) {
        if let Ok(mut state) = self.inner.write() {
            state.reloads += 1;
        }
    }

    fn refresh_css(&self) {
        let stamp = self.clock.now().timestamp_millis();
        if let Ok(mut state) = self.inner.write() {
            let refreshed = refresh_stylesheets(&mut state.links, stamp);
            debug!(refreshed, stamp, "stylesheets refreshed");
        }
    }
}
