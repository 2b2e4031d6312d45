//! Login request and response.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::admin::Admin;

/// Login request with email and password.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Successful login response: the admin identity plus the bearer token to
/// persist for the session.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub admin: Admin,
    pub token: String,
}
