//! In-memory presenters for testing and headless use.

use std::sync::{Arc, RwLock};

use enrol_core::application::ports::{Banner, FieldPresenter};

#[derive(Debug, Default)]
struct DisplayState {
    visible: bool,
    message: Option<String>,
    updates: usize,
}

/// Error region for one field, held in memory.
///
/// Clones share state, so a test can keep one handle and give another to
/// the form.
#[derive(Debug, Clone, Default)]
pub struct MemoryPresenter {
    inner: Arc<RwLock<DisplayState>>,
}

impl MemoryPresenter {
    /// Create a hidden, empty region.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while an error is shown.
    pub fn is_visible(&self) -> bool {
        self.inner.read().map(|s| s.visible).unwrap_or(false)
    }

    /// The message currently shown, if visible.
    pub fn message(&self) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.visible.then(|| inner.message.clone()).flatten()
    }

    /// Total number of show/clear calls received.
    pub fn updates(&self) -> usize {
        self.inner.read().map(|s| s.updates).unwrap_or(0)
    }
}

impl FieldPresenter for MemoryPresenter {
    fn show_error(&self, message: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.visible = true;
            inner.message = Some(message.to_string());
            inner.updates += 1;
        }
    }

    fn clear(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.visible = false;
            inner.updates += 1;
        }
    }
}

/// Success banner held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryBanner {
    inner: Arc<RwLock<DisplayState>>,
}

impl MemoryBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.read().map(|s| s.visible).unwrap_or(false)
    }

    /// Last text shown, kept after hiding.
    pub fn text(&self) -> Option<String> {
        self.inner.read().ok()?.message.clone()
    }
}

impl Banner for MemoryBanner {
    fn show(&self, message: &str) {
        if let Ok(mut inner) = self.inner.write() {
            inner.visible = true;
            inner.message = Some(message.to_string());
            inner.updates += 1;
        }
    }

    fn hide(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner.visible = false;
            inner.updates += 1;
        }
    }
}
