//! Class catalog models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{ClassId, TeacherId};
use crate::teachers::Teacher;

/// A class as stored by the backend.
///
/// Capacity accounting (`current_students <= max_students`) is enforced
/// server-side; the client renders these numbers as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub age_min: u8,
    pub age_max: u8,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    pub max_students: u32,
    pub current_students: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A class enriched with backend-derived enrollment details and the joined
/// teacher, as served by the class listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassWithDetails {
    #[serde(flatten)]
    pub class: Class,
    pub available_spots: u32,
    pub is_full: bool,
    #[serde(default)]
    pub teacher: Option<Teacher>,
}

impl ClassWithDetails {
    /// Whether a child of `age` falls in this class's age band.
    #[must_use]
    pub fn accepts_age(&self, age: u8) -> bool {
        self.class.age_min <= age && age <= self.class.age_max
    }
}

/// Payload for creating a class.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub start_time: String,
    #[validate(length(min = 1))]
    pub end_time: String,
    pub age_min: u8,
    pub age_max: u8,
    #[validate(range(min = 1))]
    pub max_students: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<TeacherId>,
}

/// Partial class update; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_min: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_max: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub max_students: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<TeacherId>,
}
