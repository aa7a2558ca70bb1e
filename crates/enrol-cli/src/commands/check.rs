//! `enrol check`: run one field rule against a value.

use enrol_adapters::SystemClock;
use enrol_core::{
    application::ports::Clock,
    domain::{FieldId, rules},
    error::EnrolError,
};
use serde_json::json;
use tracing::{debug, instrument};

use crate::{
    cli::CheckArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(field = %args.field))]
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let field: FieldId = args.field.parse().map_err(EnrolError::from)?;
    let outcome = rules::check(field, &args.value, SystemClock::new().now());
    debug!(valid = outcome.is_ok(), "rule evaluated");

    if output.is_json() {
        output.json(&json!({
            "field": field.as_str(),
            "valid": outcome.is_ok(),
            "message": outcome.err().map(|e| e.message),
        }))?;
    } else {
        match outcome {
            Ok(()) => output.success(&format!("{}: valid", field.label()))?,
            Err(e) => output.error(&format!("{}: {e}", field.label()))?,
        }
    }

    match outcome {
        Ok(()) => Ok(()),
        Err(_) => Err(CliError::ValidationFailed {
            invalid: vec![field],
        }),
    }
}
