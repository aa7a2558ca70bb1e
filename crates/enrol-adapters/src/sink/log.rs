//! Simulated transmission: the record is logged, nothing leaves the process.

use enrol_core::{
    application::ports::{Receipt, RegistrationSink},
    domain::RegistrationRecord,
    error::{Context, EnrolResult},
};
use tracing::{info, instrument};
use uuid::Uuid;

/// Sink that logs each record as JSON and acknowledges it with a fresh id.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

impl RegistrationSink for LogSink {
    #[instrument(skip_all)]
    fn transmit(&self, record: &RegistrationRecord) -> EnrolResult<Receipt> {
        let payload = serde_json::to_string(record).context("serialising registration")?;
        let reference = Uuid::new_v4().to_string();

        info!(reference = %reference, record = %payload, "Form data is valid");

        Ok(Receipt { reference })
    }
}
