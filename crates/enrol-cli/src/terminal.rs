//! Terminal implementations of the display ports.
//!
//! Each writes through an [`OutputManager`]. Write failures are logged and
//! dropped: a display that cannot update is not a form failure.

use std::sync::{Arc, Mutex};

use enrol_adapters::MemoryPage;
use enrol_core::{
    application::ports::{Banner, FieldPresenter, ReloadTarget},
    domain::{FieldId, StylesheetLink},
};
use tracing::debug;

use crate::output::OutputManager;

fn report(result: std::io::Result<()>) {
    if let Err(e) = result {
        debug!(error = %e, "terminal write failed");
    }
}

/// Prints one field's error beneath its prompt.
///
/// Repeating the message already on screen prints nothing, so live
/// validation does not flood the terminal while the user retypes.
pub struct TerminalPresenter {
    field: FieldId,
    output: OutputManager,
    shown: Mutex<Option<String>>,
}

impl TerminalPresenter {
    pub fn new(field: FieldId, output: OutputManager) -> Self {
        Self {
            field,
            output,
            shown: Mutex::new(None),
        }
    }

    /// Message currently on screen, if any.
    pub fn shown(&self) -> Option<String> {
        self.shown.lock().ok().and_then(|s| s.clone())
    }
}

impl FieldPresenter for TerminalPresenter {
    fn show_error(&self, message: &str) {
        let Ok(mut shown) = self.shown.lock() else {
            return;
        };
        if shown.as_deref() == Some(message) {
            return;
        }
        *shown = Some(message.to_string());
        report(self.output.error(&format!("{}: {message}", self.field.label())));
    }

    fn clear(&self) {
        if let Ok(mut shown) = self.shown.lock() {
            *shown = None;
        }
    }
}

/// Prints the success message once per show.
pub struct TerminalBanner {
    output: OutputManager,
}

impl TerminalBanner {
    pub fn new(output: OutputManager) -> Self {
        Self { output }
    }
}

impl Banner for TerminalBanner {
    fn show(&self, message: &str) {
        report(self.output.success(message));
    }

    fn hide(&self) {
        debug!("success banner hidden");
    }
}

/// Page stand-in for `enrol watch`: applies commands to an in-memory page
/// and prints what changed.
pub struct TerminalPage {
    page: MemoryPage,
    output: OutputManager,
}

impl TerminalPage {
    pub fn new(page: MemoryPage, output: OutputManager) -> Arc<Self> {
        Arc::new(Self { page, output })
    }
}

impl ReloadTarget for TerminalPage {
    fn reload(&self) {
        self.page.reload();
        report(
            self.output
                .info(&format!("Page reload requested (#{})", self.page.reloads())),
        );
    }

    fn refresh_css(&self) {
        self.page.refresh_css();
        let links = self.page.links();
        if links.is_empty() {
            report(self.output.info("Stylesheet refresh requested"));
            return;
        }
        for href in refreshed_hrefs(&links) {
            report(self.output.info(&format!("Stylesheet refreshed: {href}")));
        }
    }
}

/// Hrefs of the links a stylesheet refresh re-stamped.
fn refreshed_hrefs(links: &[StylesheetLink]) -> Vec<&str> {
    links
        .iter()
        .filter(|l| l.is_refreshable())
        .filter_map(|l| l.href.as_deref())
        .collect()
}
