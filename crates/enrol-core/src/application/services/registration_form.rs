//! Registration Form Service - field validators and submission coordinator.
//!
//! This service owns the form's current values and drives the injected
//! presenters:
//! 1. Per-field validation on the field's trigger (input or change)
//! 2. Whole-form validation on submit, every field always checked
//! 3. On success: hand off the record, show the banner, reset, schedule hide
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        ports::{Banner, Clock, FieldPresenter, Receipt, RegistrationSink, ScheduledTask, Scheduler},
    },
    domain::{DomainError, FieldError, FieldId, FormValues, RegistrationRecord, Trigger, rules},
    error::EnrolResult,
};

/// Text shown by the banner after a successful submit.
pub const SUCCESS_MESSAGE: &str =
    "Registration successful! (Data logged to console, ready for backend integration)";

/// How long the success banner stays up unless configured otherwise.
pub const DEFAULT_BANNER_HIDE_AFTER: Duration = Duration::from_secs(5);

/// Result of [`RegistrationForm::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field passed; the record was handed to the sink.
    Accepted {
        record: RegistrationRecord,
        receipt: Receipt,
    },
    /// At least one field failed. Lists the failing fields in form order.
    Rejected { invalid: Vec<FieldId> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// The registration form.
///
/// Presenters are optional per field: a field without one still validates,
/// its display update is skipped.
pub struct RegistrationForm {
    values: FormValues,
    presenters: HashMap<FieldId, Arc<dyn FieldPresenter>>,
    banner: Arc<dyn Banner>,
    sink: Box<dyn RegistrationSink>,
    clock: Box<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    banner_hide_after: Duration,
    pending: Vec<Box<dyn ScheduledTask>>,
}

impl RegistrationForm {
    /// Start wiring a form.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use enrol_core::application::RegistrationForm;
    ///
    /// let form = RegistrationForm::builder()
    ///     .banner(banner)       // impl Banner
    ///     .sink(sink)           // impl RegistrationSink
    ///     .clock(clock)         // impl Clock
    ///     .scheduler(scheduler) // impl Scheduler
    ///     .build()?;
    /// ```
    pub fn builder() -> RegistrationFormBuilder {
        RegistrationFormBuilder::default()
    }

    // ── Value access ──────────────────────────────────────────────────────

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(field)
    }

    // ── UI signals ────────────────────────────────────────────────────────

    /// Continuous edit signal. Stores the value; re-validates only fields
    /// whose trigger is [`Trigger::Input`].
    pub fn on_input(&mut self, field: FieldId, value: impl Into<String>) -> Option<bool> {
        self.store_and_maybe_validate(field, value.into(), Trigger::Input)
    }

    /// Commit signal. Stores the value; re-validates only fields whose
    /// trigger is [`Trigger::Change`].
    pub fn on_change(&mut self, field: FieldId, value: impl Into<String>) -> Option<bool> {
        self.store_and_maybe_validate(field, value.into(), Trigger::Change)
    }

    fn store_and_maybe_validate(
        &mut self,
        field: FieldId,
        value: String,
        signal: Trigger,
    ) -> Option<bool> {
        self.values.set(field, value);
        if field.trigger() != signal {
            trace!(field = %field, signal = %signal, "value stored without validation");
            return None;
        }
        Some(self.validate_field(field))
    }

    // ── Field validators ──────────────────────────────────────────────────

    /// Validate one field against its current value and update its
    /// presenter.
    pub fn validate_field(&self, field: FieldId) -> bool {
        self.validate_field_at(field, self.clock.now())
    }

    pub fn validate_student_name(&self) -> bool {
        self.validate_field(FieldId::StudentName)
    }

    pub fn validate_student_id(&self) -> bool {
        self.validate_field(FieldId::StudentId)
    }

    pub fn validate_email(&self) -> bool {
        self.validate_field(FieldId::Email)
    }

    pub fn validate_phone(&self) -> bool {
        self.validate_field(FieldId::Phone)
    }

    pub fn validate_dob(&self) -> bool {
        self.validate_field(FieldId::Dob)
    }

    pub fn validate_gender(&self) -> bool {
        self.validate_field(FieldId::Gender)
    }

    pub fn validate_course(&self) -> bool {
        self.validate_field(FieldId::Course)
    }

    fn validate_field_at(&self, field: FieldId, now: DateTime<Utc>) -> bool {
        match rules::check(field, self.values.get(field), now) {
            Ok(()) => {
                self.clear_error(field);
                true
            }
            Err(err) => {
                debug!(field = %field, message = err.message, "field invalid");
                self.show_error(&err);
                false
            }
        }
    }

    fn show_error(&self, err: &FieldError) {
        if let Some(presenter) = self.presenters.get(&err.field) {
            presenter.show_error(err.message);
        }
    }

    fn clear_error(&self, field: FieldId) {
        if let Some(presenter) = self.presenters.get(&field) {
            presenter.clear();
        }
    }

    // ── Submission ────────────────────────────────────────────────────────

    /// Validate every field and, if all pass, hand off the record.
    ///
    /// A sink failure is returned as an error. Values are left untouched
    /// and the banner is hidden.
    #[instrument(skip_all)]
    pub fn submit(&mut self) -> EnrolResult<SubmitOutcome> {
        let now = self.clock.now();

        // No short-circuit: every presenter must reflect its field.
        let invalid: Vec<FieldId> = FieldId::ALL
            .into_iter()
            .filter(|&field| !self.validate_field_at(field, now))
            .collect();

        if !invalid.is_empty() {
            info!(invalid = invalid.len(), "Form has validation errors.");
            self.banner.hide();
            return Ok(SubmitOutcome::Rejected { invalid });
        }

        let record = RegistrationRecord::from_values(&self.values, now).map_err(|errors| {
            DomainError::InvalidForm {
                count: errors.len(),
            }
        })?;

        let receipt = match self.sink.transmit(&record) {
            Ok(receipt) => receipt,
            Err(err) => {
                self.banner.hide();
                return Err(err);
            }
        };
        info!(reference = %receipt.reference, "Registration accepted");

        self.banner.show(SUCCESS_MESSAGE);
        self.reset();
        self.schedule_banner_hide()?;

        Ok(SubmitOutcome::Accepted { record, receipt })
    }

    /// Clear every value and every error display.
    pub fn reset(&mut self) {
        self.values.reset();
        for field in FieldId::ALL {
            self.clear_error(field);
        }
    }

    fn schedule_banner_hide(&mut self) -> EnrolResult<()> {
        let banner = Arc::clone(&self.banner);
        let task = self
            .scheduler
            .schedule(self.banner_hide_after, Box::new(move || banner.hide()))?;

        self.pending.retain(|t| !t.is_finished());
        self.pending.push(task);
        Ok(())
    }

    /// Number of banner-hide tasks that have neither run nor been cancelled.
    pub fn pending_tasks(&self) -> usize {
        self.pending.iter().filter(|t| !t.is_finished()).count()
    }

    /// Cancel every pending deferred task.
    pub fn teardown(&mut self) {
        for task in self.pending.drain(..) {
            task.cancel();
        }
        debug!("registration form torn down");
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Builder for [`RegistrationForm`].
#[derive(Default)]
pub struct RegistrationFormBuilder {
    values: FormValues,
    presenters: HashMap<FieldId, Arc<dyn FieldPresenter>>,
    banner: Option<Arc<dyn Banner>>,
    sink: Option<Box<dyn RegistrationSink>>,
    clock: Option<Box<dyn Clock>>,
    scheduler: Option<Box<dyn Scheduler>>,
    banner_hide_after: Option<Duration>,
}

impl RegistrationFormBuilder {
    pub fn presenter(mut self, field: FieldId, presenter: Arc<dyn FieldPresenter>) -> Self {
        self.presenters.insert(field, presenter);
        self
    }

    pub fn banner(mut self, banner: Arc<dyn Banner>) -> Self {
        self.banner = Some(banner);
        self
    }

    pub fn sink(mut self, sink: Box<dyn RegistrationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn scheduler(mut self, scheduler: Box<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    pub fn banner_hide_after(mut self, delay: Duration) -> Self {
        self.banner_hide_after = Some(delay);
        self
    }

    /// Pre-fill the form.
    pub fn values(mut self, values: FormValues) -> Self {
        self.values = values;
        self
    }

    pub fn build(self) -> EnrolResult<RegistrationForm> {
        Ok(RegistrationForm {
            values: self.values,
            presenters: self.presenters,
            banner: self
                .banner
                .ok_or(ApplicationError::AdapterNotConfigured { name: "banner" })?,
            sink: self
                .sink
                .ok_or(ApplicationError::AdapterNotConfigured { name: "sink" })?,
            clock: self
                .clock
                .ok_or(ApplicationError::AdapterNotConfigured { name: "clock" })?,
            scheduler: self
                .scheduler
                .ok_or(ApplicationError::AdapterNotConfigured { name: "scheduler" })?,
            banner_hide_after: self.banner_hide_after.unwrap_or(DEFAULT_BANNER_HIDE_AFTER),
            pending: Vec::new(),
        })
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    };

    use chrono::TimeZone;
    use mockall::mock;

    use crate::domain::rules::{DOB_FUTURE_MESSAGE, DOB_REQUIRED_MESSAGE, NAME_MESSAGE};
    use crate::error::EnrolError;

    mock! {
        pub Presenter {}
        impl FieldPresenter for Presenter {
            fn show_error(&self, message: &str);
            fn clear(&self);
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Shown {
        Error(String),
        Cleared,
    }

    #[derive(Default)]
    struct RecordingPresenter {
        events: Mutex<Vec<Shown>>,
    }

    impl RecordingPresenter {
        fn last(&self) -> Option<Shown> {
            self.events.lock().unwrap().last().cloned()
        }
    }

    impl FieldPresenter for RecordingPresenter {
        fn show_error(&self, message: &str) {
            self.events.lock().unwrap().push(Shown::Error(message.into()));
        }
        fn clear(&self) {
            self.events.lock().unwrap().push(Shown::Cleared);
        }
    }

    #[derive(Default)]
    struct FlagBanner {
        visible: AtomicBool,
    }

    impl Banner for FlagBanner {
        fn show(&self, _message: &str) {
            self.visible.store(true, Ordering::SeqCst);
        }
        fn hide(&self) {
            self.visible.store(false, Ordering::SeqCst);
        }
    }

    struct StaticClock;

    impl Clock for StaticClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
        }
    }

    struct OkSink;

    impl RegistrationSink for OkSink {
        fn transmit(&self, _record: &RegistrationRecord) -> EnrolResult<Receipt> {
            Ok(Receipt {
                reference: "ref-1".into(),
            })
        }
    }

    struct FailingSink;

    impl RegistrationSink for FailingSink {
        fn transmit(&self, _record: &RegistrationRecord) -> EnrolResult<Receipt> {
            Err(ApplicationError::SinkFailed {
                reason: "offline".into(),
            }
            .into())
        }
    }

    struct NoopTask;

    impl ScheduledTask for NoopTask {
        fn cancel(&self) {}
        fn is_finished(&self) -> bool {
            false
        }
    }

    /// Drops every task; enough where the banner timer is not under test.
    struct NeverScheduler;

    impl Scheduler for NeverScheduler {
        fn schedule(
            &self,
            _delay: Duration,
            _task: crate::application::Task,
        ) -> EnrolResult<Box<dyn ScheduledTask>> {
            Ok(Box::new(NoopTask))
        }
    }

    fn presenters() -> HashMap<FieldId, Arc<RecordingPresenter>> {
        FieldId::ALL
            .into_iter()
            .map(|f| (f, Arc::new(RecordingPresenter::default())))
            .collect()
    }

    fn form_with(
        presenters: &HashMap<FieldId, Arc<RecordingPresenter>>,
        banner: Arc<FlagBanner>,
        sink: Box<dyn RegistrationSink>,
    ) -> RegistrationForm {
        let mut builder = RegistrationForm::builder()
            .banner(banner)
            .sink(sink)
            .clock(Box::new(StaticClock))
            .scheduler(Box::new(NeverScheduler));
        for (field, presenter) in presenters {
            builder = builder.presenter(*field, presenter.clone());
        }
        builder.build().unwrap()
    }

    fn fill_valid(form: &mut RegistrationForm) {
        form.on_input(FieldId::StudentName, "Ada Lovelace");
        form.on_input(FieldId::StudentId, "S12345");
        form.on_input(FieldId::Email, "ada@example.com");
        form.on_input(FieldId::Phone, "123-456-7890");
        form.on_change(FieldId::Dob, "2000-12-10");
        form.on_change(FieldId::Gender, "Female");
        form.on_input(FieldId::Course, "Mathematics");
    }

    #[test]
    fn name_validator_shows_and_clears() {
        let presenters = presenters();
        let mut form = form_with(&presenters, Arc::default(), Box::new(OkSink));

        assert_eq!(form.on_input(FieldId::StudentName, "Al"), Some(false));
        assert_eq!(
            presenters[&FieldId::StudentName].last(),
            Some(Shown::Error(NAME_MESSAGE.into()))
        );

        assert_eq!(form.on_input(FieldId::StudentName, "Ali"), Some(true));
        assert_eq!(presenters[&FieldId::StudentName].last(), Some(Shown::Cleared));
    }

    #[test]
    fn dob_messages_depend_on_failure() {
        let presenters = presenters();
        let mut form = form_with(&presenters, Arc::default(), Box::new(OkSink));

        assert_eq!(form.on_change(FieldId::Dob, ""), Some(false));
        assert_eq!(
            presenters[&FieldId::Dob].last(),
            Some(Shown::Error(DOB_REQUIRED_MESSAGE.into()))
        );

        assert_eq!(form.on_change(FieldId::Dob, "2030-01-01"), Some(false));
        assert_eq!(
            presenters[&FieldId::Dob].last(),
            Some(Shown::Error(DOB_FUTURE_MESSAGE.into()))
        );

        assert_eq!(form.on_change(FieldId::Dob, "1990-01-01"), Some(true));
    }

    #[test]
    fn change_signal_does_not_validate_text_fields() {
        let presenters = presenters();
        let mut form = form_with(&presenters, Arc::default(), Box::new(OkSink));

        assert_eq!(form.on_change(FieldId::Email, "bad"), None);
        assert_eq!(form.value(FieldId::Email), "bad");
        assert_eq!(presenters[&FieldId::Email].last(), None);
    }

    #[test]
    fn input_signal_does_not_validate_discrete_fields() {
        let presenters = presenters();
        let mut form = form_with(&presenters, Arc::default(), Box::new(OkSink));

        assert_eq!(form.on_input(FieldId::Gender, ""), None);
        assert_eq!(form.on_input(FieldId::Dob, "2999-01-01"), None);
        assert_eq!(presenters[&FieldId::Gender].last(), None);
        assert_eq!(presenters[&FieldId::Dob].last(), None);
    }

    #[test]
    fn validators_only_touch_their_own_field() {
        let presenters = presenters();
        let form = form_with(&presenters, Arc::default(), Box::new(OkSink));

        assert!(!form.validate_course());
        for (field, presenter) in &presenters {
            if *field != FieldId::Course {
                assert_eq!(presenter.last(), None, "{field} was touched");
            }
        }
    }

    #[test]
    fn missing_presenter_is_skipped() {
        let mut form = RegistrationForm::builder()
            .banner(Arc::new(FlagBanner::default()))
            .sink(Box::new(OkSink))
            .clock(Box::new(StaticClock))
            .scheduler(Box::new(NeverScheduler))
            .build()
            .unwrap();

        assert_eq!(form.on_input(FieldId::StudentName, ""), Some(false));
        assert!(matches!(
            form.submit().unwrap(),
            SubmitOutcome::Rejected { .. }
        ));
    }

    #[test]
    fn submit_runs_every_validator() {
        let presenters = presenters();
        let banner = Arc::new(FlagBanner::default());
        let mut form = form_with(&presenters, banner.clone(), Box::new(OkSink));

        let outcome = form.submit().unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                invalid: vec![
                    FieldId::StudentName,
                    FieldId::StudentId,
                    FieldId::Email,
                    FieldId::Dob,
                    FieldId::Gender,
                    FieldId::Course,
                ]
            }
        );
        assert_eq!(presenters[&FieldId::Phone].last(), Some(Shown::Cleared));
        assert!(!banner.visible.load(Ordering::SeqCst));
    }

    #[test]
    fn accepted_submit_resets_and_shows_banner() {
        let presenters = presenters();
        let banner = Arc::new(FlagBanner::default());
        let mut form = form_with(&presenters, banner.clone(), Box::new(OkSink));
        fill_valid(&mut form);

        let SubmitOutcome::Accepted { record, receipt } = form.submit().unwrap() else {
            panic!("expected acceptance");
        };
        assert_eq!(record.student_name(), "Ada Lovelace");
        assert_eq!(record.phone(), "123-456-7890");
        assert_eq!(receipt.reference, "ref-1");
        assert!(banner.visible.load(Ordering::SeqCst));
        assert!(form.values().is_blank());
        for presenter in presenters.values() {
            assert_eq!(presenter.last(), Some(Shown::Cleared));
        }
        assert_eq!(form.pending_tasks(), 1);
    }

    #[test]
    fn sink_failure_keeps_values() {
        let presenters = presenters();
        let banner = Arc::new(FlagBanner::default());
        let mut form = form_with(&presenters, banner.clone(), Box::new(FailingSink));
        fill_valid(&mut form);

        let err = form.submit().unwrap_err();
        assert!(matches!(
            err,
            EnrolError::Application(ApplicationError::SinkFailed { .. })
        ));
        assert_eq!(form.value(FieldId::StudentName), "Ada Lovelace");
        assert!(!banner.visible.load(Ordering::SeqCst));
    }

    #[test]
    fn build_requires_adapters() {
        let err = RegistrationForm::builder().build().err().unwrap();
        assert!(matches!(
            err,
            EnrolError::Application(ApplicationError::AdapterNotConfigured { name: "banner" })
        ));
    }

    #[test]
    fn mocked_presenter_sees_error_then_clear() {
        let mut presenter = MockPresenter::new();
        let mut seq = mockall::Sequence::new();
        presenter
            .expect_show_error()
            .withf(|message| message == crate::domain::rules::STUDENT_ID_MESSAGE)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        presenter
            .expect_clear()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut form = RegistrationForm::builder()
            .presenter(FieldId::StudentId, Arc::new(presenter))
            .banner(Arc::new(FlagBanner::default()))
            .sink(Box::new(OkSink))
            .clock(Box::new(StaticClock))
            .scheduler(Box::new(NeverScheduler))
            .build()
            .unwrap();

        assert_eq!(form.on_input(FieldId::StudentId, "S 123"), Some(false));
        assert_eq!(form.on_input(FieldId::StudentId, "S123"), Some(true));
    }
}
