//! Form field identities and their validation triggers.
//!
//! # Adding a field
//!
//! 1. Add the enum variant and extend `ALL`
//! 2. Add the `as_str`, `label`, `trigger` and `FromStr` arms
//! 3. Add its rule in `rules.rs` and its slot in `RegistrationRecord`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

// ── Trigger ──────────────────────────────────────────────────────────────────

/// Which UI signal re-validates a field.
///
/// Free-text fields get live feedback on every keystroke; discrete-choice
/// fields validate only once a value is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Continuous signal (every edit).
    Input,
    /// Discrete signal (value committed).
    Change,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Input => "input",
            Self::Change => "change",
        })
    }
}

// ── FieldId ──────────────────────────────────────────────────────────────────

/// One of the seven registration form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    StudentName,
    StudentId,
    Email,
    Phone,
    Dob,
    Gender,
    Course,
}

impl FieldId {
    /// Every field, in form (and validation) order.
    pub const ALL: [FieldId; 7] = [
        Self::StudentName,
        Self::StudentId,
        Self::Email,
        Self::Phone,
        Self::Dob,
        Self::Gender,
        Self::Course,
    ];

    /// Stable key, also the wire name in [`RegistrationRecord`](crate::domain::RegistrationRecord).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StudentName => "studentName",
            Self::StudentId => "studentId",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Dob => "dob",
            Self::Gender => "gender",
            Self::Course => "course",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::StudentName => "Student Name",
            Self::StudentId => "Student ID",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Dob => "Date of Birth",
            Self::Gender => "Gender",
            Self::Course => "Course Enrolled",
        }
    }

    pub const fn trigger(&self) -> Trigger {
        match self {
            Self::Dob | Self::Gender => Trigger::Change,
            _ => Trigger::Input,
        }
    }

    /// Whether an empty value is acceptable.
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Phone)
    }

    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "studentname" | "name" => Ok(Self::StudentName),
            "studentid" | "id" => Ok(Self::StudentId),
            "email" => Ok(Self::Email),
            "phone" => Ok(Self::Phone),
            "dob" | "dateofbirth" => Ok(Self::Dob),
            "gender" => Ok(Self::Gender),
            "course" => Ok(Self::Course),
            _ => Err(DomainError::UnknownField(s.to_string())),
        }
    }
}
