//! Backend API connection settings.

use std::env;
use std::time::Duration;

/// Connection settings for the backend REST API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: String,
    /// Client-side timeout applied to every request.
    pub timeout: Duration,
    /// Attempts for the profile fetch, including the first one.
    pub profile_retry_attempts: u32,
    /// Pause between profile-fetch attempts.
    pub profile_retry_delay: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(20),
            profile_retry_attempts: 3,
            profile_retry_delay: Duration::from_secs(1),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("MAKTAB_API_BASE_URL").unwrap_or(defaults.base_url),
            timeout: env::var("MAKTAB_API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            profile_retry_attempts: env::var("MAKTAB_PROFILE_RETRY_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.profile_retry_attempts),
            profile_retry_delay: env::var("MAKTAB_PROFILE_RETRY_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.profile_retry_delay),
        }
    }

    /// Replaces the base URL, keeping everything else. Used by tests pointed
    /// at an in-process backend.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
