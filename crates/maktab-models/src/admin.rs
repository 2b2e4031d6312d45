//! The authenticated administrator.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::AdminId;

/// Role of an administrator account.
///
/// The role only gates which console controls are *offered*; the backend
/// re-checks authorization on every mutation and remains the authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
}

impl AdminRole {
    #[must_use]
    pub fn is_super_admin(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

/// The administrator identity attached to the current session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: AdminId,
    pub username: String,
    pub email: String,
    pub role: AdminRole,
    pub is_active: bool,
}

/// Partial profile update; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1))]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,
}
