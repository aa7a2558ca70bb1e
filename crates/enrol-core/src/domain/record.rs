//! Form values and the registration record built from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{
    error::FieldError,
    field::FieldId,
    rules,
};

// ── FormValues ───────────────────────────────────────────────────────────────

/// Raw, unvalidated value of every form field.
///
/// This is the form context handed to the validators; it replaces ambient
/// element lookups with one explicit value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: [String; FieldId::ALL.len()],
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: FieldId) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Empty every field.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(String::clear);
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &str)> {
        FieldId::ALL.iter().map(|&f| (f, self.get(f)))
    }
}

// ── RegistrationRecord ───────────────────────────────────────────────────────

/// The validated registration, produced only when every field passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    student_name: String,
    student_id: String,
    email: String,
    phone: String,
    dob: NaiveDate,
    gender: String,
    course: String,
}

impl RegistrationRecord {
    /// Validate every field of `values` and build the record.
    ///
    /// All rules run; on failure every [`FieldError`] is returned in form
    /// order.
    pub fn from_values(values: &FormValues, now: DateTime<Utc>) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();

        let student_name = rules::check_student_name(values.get(FieldId::StudentName))
            .map_err(|e| errors.push(e))
            .ok();
        let student_id = rules::check_student_id(values.get(FieldId::StudentId))
            .map_err(|e| errors.push(e))
            .ok();
        let email = rules::check_email(values.get(FieldId::Email))
            .map_err(|e| errors.push(e))
            .ok();
        let phone = rules::check_phone(values.get(FieldId::Phone))
            .map_err(|e| errors.push(e))
            .ok();
        let dob = rules::check_dob(values.get(FieldId::Dob), now)
            .map_err(|e| errors.push(e))
            .ok();
        let gender = rules::check_gender(values.get(FieldId::Gender))
            .map_err(|e| errors.push(e))
            .ok();
        let course = rules::check_course(values.get(FieldId::Course))
            .map_err(|e| errors.push(e))
            .ok();

        match (student_name, student_id, email, phone, dob, gender, course) {
            (
                Some(student_name),
                Some(student_id),
                Some(email),
                Some(phone),
                Some(dob),
                Some(gender),
                Some(course),
            ) => Ok(Self {
                student_name: student_name.to_owned(),
                student_id: student_id.to_owned(),
                email: email.to_owned(),
                phone: phone.to_owned(),
                dob,
                gender: gender.to_owned(),
                course: course.to_owned(),
            }),
            _ => Err(errors),
        }
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Empty when no phone number was given.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn dob(&self) -> NaiveDate {
        self.dob
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn course(&self) -> &str {
        &self.course
    }
}
