//! Registration rows, boundary parsing, and the public registration form.
//!
//! Listing endpoints occasionally return rows whose joined `student` relation
//! is missing (orphaned backend data). Instead of presence-checking that
//! field at every render site, rows are parsed once at the fetch boundary
//! into [`ParsedRegistration`]: consumers only ever see [`Registration`]
//! values, and the number of discarded rows is kept as a data-quality signal.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::classes::Class;
use crate::ids::{ClassId, ParentId, StudentId};
use crate::teachers::Teacher;

/// Where a registration sits in the review pipeline.
///
/// Transitions are decided server-side; the client only requests them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The student half of a registration row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: StudentId,
    pub parent_id: ParentId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: DateTime<Utc>,
    pub age: u8,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    pub registration_status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StudentRecord {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The parent/guardian half of a registration row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRecord {
    pub id: ParentId,
    pub father_first_name: String,
    pub father_last_name: String,
    pub father_phone: String,
    pub father_email: String,
    #[serde(default)]
    pub mother_first_name: Option<String>,
    #[serde(default)]
    pub mother_last_name: Option<String>,
    #[serde(default)]
    pub mother_phone: Option<String>,
    #[serde(default)]
    pub mother_email: Option<String>,
}

/// A registration row exactly as the backend serializes it, joined relations
/// included and possibly missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationRow {
    #[serde(default)]
    pub student: Option<StudentRecord>,
    #[serde(default)]
    pub parent: Option<ParentRecord>,
    #[serde(default)]
    pub class: Option<Class>,
    #[serde(default)]
    pub teacher: Option<Teacher>,
}

/// A registration whose required relations are known to be present.
#[derive(Debug, Clone)]
pub struct Registration {
    pub student: StudentRecord,
    pub parent: ParentRecord,
    pub class: Option<Class>,
    pub teacher: Option<Teacher>,
}

/// Outcome of parsing one row at the fetch boundary.
#[derive(Debug, Clone)]
pub enum ParsedRegistration {
    Valid(Registration),
    /// The row is missing a required relation; the raw row is kept for
    /// operator investigation.
    Invalid(RegistrationRow),
}

impl RegistrationRow {
    /// Parses the row, requiring the student and parent relations.
    pub fn parse(self) -> ParsedRegistration {
        match (self.student, self.parent) {
            (Some(student), Some(parent)) => ParsedRegistration::Valid(Registration {
                student,
                parent,
                class: self.class,
                teacher: self.teacher,
            }),
            (student, parent) => ParsedRegistration::Invalid(RegistrationRow {
                student,
                parent,
                class: self.class,
                teacher: self.teacher,
            }),
        }
    }
}

/// Splits fetched rows into valid registrations and a discarded count.
pub fn partition_rows(rows: Vec<RegistrationRow>) -> (Vec<Registration>, usize) {
    let total = rows.len();
    let valid: Vec<Registration> = rows
        .into_iter()
        .filter_map(|row| match row.parse() {
            ParsedRegistration::Valid(registration) => Some(registration),
            ParsedRegistration::Invalid(_) => None,
        })
        .collect();
    let discarded = total - valid.len();
    (valid, discarded)
}

/// Query parameters accepted by the registration listing endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RegistrationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ClassId>,
}

impl RegistrationQuery {
    pub fn page(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }
}

/// The student section of the public registration form.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentForm {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<ClassId>,
}

impl StudentForm {
    /// The child's age in whole years as of `today`.
    #[must_use]
    pub fn age_on(&self, today: NaiveDate) -> u8 {
        let mut age = today.years_since(self.date_of_birth).unwrap_or(0);
        if age > u32::from(u8::MAX) {
            age = u32::from(u8::MAX);
        }
        age as u8
    }
}

/// The parent section of the public registration form. Father contact
/// details are required; mother details are optional.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParentForm {
    #[validate(length(min = 1))]
    pub father_first_name: String,
    #[validate(length(min = 1))]
    pub father_last_name: String,
    #[validate(length(min = 6))]
    pub father_phone: String,
    #[validate(email)]
    pub father_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mother_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub mother_email: Option<String>,
}

/// The complete public registration submission.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct RegistrationForm {
    #[validate(nested)]
    pub parent: ParentForm,
    #[validate(nested)]
    pub student: StudentForm,
}

/// Receipt returned by a successful registration submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub student_id: StudentId,
    pub parent_id: ParentId,
}

/// Payload for a status transition request.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdateRequest {
    pub status: RegistrationStatus,
}

/// Payload for assigning a registration to a class.
///
/// `class_id` is always serialized: `null` clears the assignment, so it must
/// not be skipped when absent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAssignmentRequest {
    pub class_id: Option<ClassId>,
}
