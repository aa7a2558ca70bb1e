//! In-memory sink for testing.

use std::sync::{Arc, RwLock};

use enrol_core::{
    application::{
        ApplicationError,
        ports::{Receipt, RegistrationSink},
    },
    domain::RegistrationRecord,
    error::EnrolResult,
};

#[derive(Debug, Default)]
struct MemorySinkInner {
    records: Vec<RegistrationRecord>,
    failure: Option<String>,
}

/// Keeps every transmitted record. Clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<RwLock<MemorySinkInner>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every record with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        let sink = Self::new();
        sink.fail_with(reason);
        sink
    }

    /// Reject every record from now on. Affects all clones.
    pub fn fail_with(&self, reason: impl Into<String>) {
        if let Ok(mut inner) = self.inner.write() {
            inner.failure = Some(reason.into());
        }
    }

    /// Records received so far, oldest first.
    pub fn records(&self) -> Vec<RegistrationRecord> {
        self.inner
            .read()
            .map(|inner| inner.records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RegistrationSink for MemorySink {
    fn transmit(&self, record: &RegistrationRecord) -> EnrolResult<Receipt> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockError { name: "memory sink" })?;

        if let Some(reason) = &inner.failure {
            return Err(ApplicationError::SinkFailed {
                reason: reason.clone(),
            }
            .into());
        }

        inner.records.push(record.clone());
        Ok(Receipt {
            reference: format!("memory-{}", inner.records.len()),
        })
    }
}
