//! Field rules: literal patterns, fixed messages, pure checks.
//!
//! Each `check_*` function looks at one raw value and either returns the
//! normalized value that goes into a [`RegistrationRecord`] or the
//! [`FieldError`] for that field. Nothing here touches presenters.
//!
//! [`RegistrationRecord`]: crate::domain::RegistrationRecord

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::domain::{error::FieldError, field::FieldId};

// ── Patterns ─────────────────────────────────────────────────────────────────

pub const STUDENT_ID_PATTERN: &str = r"^[a-zA-Z0-9]+$";
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
pub const PHONE_PATTERN: &str = r"^\+?[0-9\s-]{7,20}$";

/// Minimum length of a trimmed student name, in UTF-16 code units.
pub const MIN_NAME_LEN: usize = 3;

/// Wire format of a date-of-birth value.
pub const DOB_FORMAT: &str = "%Y-%m-%d";

static STUDENT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STUDENT_ID_PATTERN).expect("student id pattern compiles"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"));

// ── Messages ─────────────────────────────────────────────────────────────────

pub const NAME_MESSAGE: &str = "Student name is required and must be at least 3 characters long.";
pub const STUDENT_ID_MESSAGE: &str =
    "Student ID is required and must be alphanumeric (e.g., S12345).";
pub const EMAIL_MESSAGE: &str = "A valid email address is required.";
pub const PHONE_MESSAGE: &str = "Please enter a valid phone number (optional).";
pub const DOB_REQUIRED_MESSAGE: &str = "Date of Birth is required.";
pub const DOB_FUTURE_MESSAGE: &str = "Date of Birth cannot be in the future.";
pub const GENDER_MESSAGE: &str = "Gender is required.";
pub const COURSE_MESSAGE: &str = "Course Enrolled is required.";

// ── Checks ───────────────────────────────────────────────────────────────────

/// Whitespace as browsers trim it: Unicode `White_Space` minus U+0085,
/// plus the byte order mark U+FEFF.
fn is_form_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Trim `raw` the way a browser trims a form control value.
pub fn trim_input(raw: &str) -> &str {
    raw.trim_matches(is_form_whitespace)
}

pub fn check_student_name(raw: &str) -> Result<&str, FieldError> {
    let name = trim_input(raw);
    if name.encode_utf16().count() < MIN_NAME_LEN {
        return Err(FieldError::new(FieldId::StudentName, NAME_MESSAGE));
    }
    Ok(name)
}

pub fn check_student_id(raw: &str) -> Result<&str, FieldError> {
    let id = trim_input(raw);
    if id.is_empty() || !STUDENT_ID_RE.is_match(id) {
        return Err(FieldError::new(FieldId::StudentId, STUDENT_ID_MESSAGE));
    }
    Ok(id)
}

pub fn check_email(raw: &str) -> Result<&str, FieldError> {
    let email = trim_input(raw);
    if !EMAIL_RE.is_match(email) {
        return Err(FieldError::new(FieldId::Email, EMAIL_MESSAGE));
    }
    Ok(email)
}

/// Phone is optional: an empty (after trimming) value passes.
pub fn check_phone(raw: &str) -> Result<&str, FieldError> {
    let phone = trim_input(raw);
    if !phone.is_empty() && !PHONE_RE.is_match(phone) {
        return Err(FieldError::new(FieldId::Phone, PHONE_MESSAGE));
    }
    Ok(phone)
}

/// Emptiness is checked before futurity.
///
/// The value is a calendar date taken at UTC midnight, so any date up to
/// and including `now`'s UTC date passes. A value that does not parse is
/// reported like an empty one, mirroring a date control that exposes no
/// value for unparseable input.
pub fn check_dob(raw: &str, now: DateTime<Utc>) -> Result<NaiveDate, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(FieldId::Dob, DOB_REQUIRED_MESSAGE));
    }
    let Ok(date) = NaiveDate::parse_from_str(raw, DOB_FORMAT) else {
        return Err(FieldError::new(FieldId::Dob, DOB_REQUIRED_MESSAGE));
    };
    if date > now.date_naive() {
        return Err(FieldError::new(FieldId::Dob, DOB_FUTURE_MESSAGE));
    }
    Ok(date)
}

/// The option set is a UI concern; any non-empty selection passes.
pub fn check_gender(raw: &str) -> Result<&str, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::new(FieldId::Gender, GENDER_MESSAGE));
    }
    Ok(raw)
}

pub fn check_course(raw: &str) -> Result<&str, FieldError> {
    let course = trim_input(raw);
    if course.is_empty() {
        return Err(FieldError::new(FieldId::Course, COURSE_MESSAGE));
    }
    Ok(course)
}

/// Run the rule for `field` against `raw`.
pub fn check(field: FieldId, raw: &str, now: DateTime<Utc>) -> Result<(), FieldError> {
    match field {
        FieldId::StudentName => check_student_name(raw).map(drop),
        FieldId::StudentId => check_student_id(raw).map(drop),
        FieldId::Email => check_email(raw).map(drop),
        FieldId::Phone => check_phone(raw).map(drop),
        FieldId::Dob => check_dob(raw, now).map(drop),
        FieldId::Gender => check_gender(raw).map(drop),
        FieldId::Course => check_course(raw).map(drop),
    }
}
