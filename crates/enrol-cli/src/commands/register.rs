//! `enrol register`: fill in the form and submit it.
//!
//! Flags prefill the form and submit once. `--interactive` prompts field by
//! field with live validation and re-prompts whatever a submit rejects.

use std::sync::Arc;

use serde_json::json;
use tokio::runtime::{Handle, Runtime};
use tracing::{info, instrument};

use enrol_adapters::{LogSink, MemoryBanner, MemoryPresenter, SystemClock, TokioScheduler};
use enrol_core::{
    application::{
        RegistrationForm, SubmitOutcome,
        ports::{Banner, FieldPresenter},
    },
    domain::{FieldId, FormValues},
};

use crate::{
    cli::RegisterArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    terminal::{TerminalBanner, TerminalPresenter},
};

/// A form wired to the terminal, plus the in-memory presenters that stand
/// in for it under `--output-format json`.
struct Session {
    form: RegistrationForm,
    captured: Vec<(FieldId, MemoryPresenter)>,
}

#[instrument(skip_all, fields(interactive = args.interactive))]
pub fn execute(args: RegisterArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    // Hosts the banner-hide timer.
    let runtime = timer_runtime()?;

    let values = if args.interactive {
        FormValues::new()
    } else {
        values_from(&args)
    };
    let mut session = Session::build(runtime.handle(), &config, &output, values)?;

    let result = if args.interactive {
        interactive::run(&mut session, &config, &output)
    } else {
        session.submit_once(&output)
    };

    session.form.teardown();
    result
}

fn timer_runtime() -> CliResult<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("enrol-timer")
        .enable_time()
        .build()
        .with_cli_context(|| "failed to start the timer runtime")
}

/// Flags present on the command line, in field order.
fn values_from(args: &RegisterArgs) -> FormValues {
    [
        (FieldId::StudentName, &args.name),
        (FieldId::StudentId, &args.student_id),
        (FieldId::Email, &args.email),
        (FieldId::Phone, &args.phone),
        (FieldId::Dob, &args.dob),
        (FieldId::Gender, &args.gender),
        (FieldId::Course, &args.course),
    ]
    .into_iter()
    .fold(FormValues::new(), |values, (field, value)| match value {
        Some(v) => values.with(field, v.as_str()),
        None => values,
    })
}

impl Session {
    fn build(
        handle: &Handle,
        config: &AppConfig,
        output: &OutputManager,
        values: FormValues,
    ) -> CliResult<Self> {
        let banner: Arc<dyn Banner> = if output.is_json() {
            Arc::new(MemoryBanner::new())
        } else {
            Arc::new(TerminalBanner::new(output.clone()))
        };

        let mut builder = RegistrationForm::builder()
            .banner(banner)
            .sink(Box::new(LogSink::new()))
            .clock(Box::new(SystemClock::new()))
            .scheduler(Box::new(TokioScheduler::new(handle.clone())))
            .banner_hide_after(config.banner_hide_after())
            .values(values);

        let mut captured = Vec::new();
        for field in FieldId::ALL {
            let presenter: Arc<dyn FieldPresenter> = if output.is_json() {
                let memory = MemoryPresenter::new();
                captured.push((field, memory.clone()));
                Arc::new(memory)
            } else {
                Arc::new(TerminalPresenter::new(field, output.clone()))
            };
            builder = builder.presenter(field, presenter);
        }

        Ok(Self {
            form: builder.build()?,
            captured,
        })
    }

    fn submit_once(&mut self, output: &OutputManager) -> CliResult<()> {
        match self.form.submit()? {
            SubmitOutcome::Accepted { record, receipt } => {
                info!(reference = %receipt.reference, "registration submitted");
                if output.is_json() {
                    output.json(&json!({
                        "status": "accepted",
                        "reference": receipt.reference,
                        "record": record,
                    }))?;
                } else {
                    output.info(&format!("Reference: {}", receipt.reference))?;
                }
                Ok(())
            }
            SubmitOutcome::Rejected { invalid } => {
                if output.is_json() {
                    output.json(&json!({
                        "status": "rejected",
                        "errors": self.captured_errors(),
                    }))?;
                }
                Err(CliError::ValidationFailed { invalid })
            }
        }
    }

    fn captured_errors(&self) -> Vec<serde_json::Value> {
        self.captured
            .iter()
            .filter_map(|(field, presenter)| {
                presenter
                    .message()
                    .filter(|_| presenter.is_visible())
                    .map(|message| json!({ "field": field.as_str(), "message": message }))
            })
            .collect()
    }
}

#[cfg(feature = "interactive")]
mod interactive {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
    use enrol_core::{
        application::{RegistrationForm, SubmitOutcome},
        domain::{FieldId, Trigger},
    };
    use tracing::debug;

    use super::Session;
    use crate::{config::AppConfig, error::CliResult, output::OutputManager};

    pub(super) fn run(
        session: &mut Session,
        config: &AppConfig,
        output: &OutputManager,
    ) -> CliResult<()> {
        let theme = ColorfulTheme::default();
        output.header("Student Registration")?;

        let mut pending = FieldId::ALL.to_vec();
        loop {
            for field in pending.drain(..) {
                prompt_until_valid(&mut session.form, field, config, &theme)?;
            }

            match session.form.submit()? {
                SubmitOutcome::Accepted { receipt, .. } => {
                    output.info(&format!("Reference: {}", receipt.reference))?;
                    let again = Confirm::with_theme(&theme)
                        .with_prompt("Register another student?")
                        .default(false)
                        .interact()?;
                    if !again {
                        return Ok(());
                    }
                    pending = FieldId::ALL.to_vec();
                }
                SubmitOutcome::Rejected { invalid } => {
                    output.warning("Some fields need another look")?;
                    pending = invalid;
                }
            }
        }
    }

    fn prompt_until_valid(
        form: &mut RegistrationForm,
        field: FieldId,
        config: &AppConfig,
        theme: &ColorfulTheme,
    ) -> CliResult<()> {
        loop {
            let valid = if field == FieldId::Gender {
                let options = &config.form.gender_options;
                let index = Select::with_theme(theme)
                    .with_prompt(field.label())
                    .items(options)
                    .default(0)
                    .interact()?;
                form.on_change(field, options[index].as_str())
            } else {
                let value: String = Input::with_theme(theme)
                    .with_prompt(prompt_for(field))
                    .allow_empty(true)
                    .interact_text()?;
                match field.trigger() {
                    Trigger::Input => form.on_input(field, value),
                    Trigger::Change => form.on_change(field, value),
                }
            };

            debug!(field = %field, ?valid, "field entered");
            if valid == Some(true) {
                return Ok(());
            }
        }
    }

    fn prompt_for(field: FieldId) -> String {
        match field {
            FieldId::Dob => format!("{} (YYYY-MM-DD)", field.label()),
            f if f.is_optional() => format!("{} (optional)", f.label()),
            f => f.label().to_string(),
        }
    }
}

#[cfg(not(feature = "interactive"))]
mod interactive {
    use super::Session;
    use crate::{
        config::AppConfig,
        error::{CliError, CliResult},
        output::OutputManager,
    };

    pub(super) fn run(
        _session: &mut Session,
        _config: &AppConfig,
        _output: &OutputManager,
    ) -> CliResult<()> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }
}
