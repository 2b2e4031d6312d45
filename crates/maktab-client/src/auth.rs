//! Authentication operations.

use reqwest::Method;

use maktab_core::errors::ApiResult;
use maktab_core::retry::retry_transient;
use maktab_models::admin::{Admin, UpdateProfileRequest};
use maktab_models::auth::{LoginRequest, LoginResponse};

use crate::client::{ApiClient, with_json};

impl ApiClient {
    /// Authenticates and, on success, caches and persists the issued token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        Self::reject_invalid(&request)?;

        let response: LoginResponse = self
            .request(Method::POST, "/auth/login", with_json(&request))
            .await?;
        if !response.token.is_empty() {
            self.set_token(Some(&response.token));
        }
        Ok(response)
    }

    /// Fetches the current admin's profile.
    ///
    /// Runs on every session restore to validate the persisted token, so
    /// transient failures are retried per the configured policy instead of
    /// forcing a spurious logout. A 401 is surfaced immediately.
    pub async fn get_profile(&self) -> ApiResult<Admin> {
        retry_transient(self.profile_retry, |_attempt| {
            self.request::<Admin, _>(Method::GET, "/auth/profile", |builder| builder)
        })
        .await
    }

    /// Applies a partial profile update, returning the merged identity.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<Admin> {
        Self::reject_invalid(request)?;
        self.request(Method::PUT, "/auth/profile", with_json(request))
            .await
    }
}
