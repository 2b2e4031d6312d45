//! The session state machine.
//!
//! Owns the in-memory authentication state: the current admin identity and
//! where the session sits in its lifecycle. The invariant maintained across
//! every transition: identity is present if and only if the store believes
//! the current token is valid.
//!
//! `check_auth` is the restore entry point run on every shell startup. It is
//! debounced against itself, and it treats only a confirmed 401 as grounds
//! for logging the session out. An arbitrary network error leaves the
//! identity in place, because kicking an admin out over a flaky connection
//! is worse than showing briefly stale state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use maktab_client::ApiClient;
use maktab_core::errors::ApiResult;
use maktab_models::admin::{Admin, UpdateProfileRequest};

/// Tracing target for session transitions.
pub const TRACING_TARGET: &str = "maktab_stores::session";

/// How long repeat `check_auth` calls are suppressed. Multiple shell entry
/// points fire a session check on startup; only the first within this window
/// performs a profile fetch.
pub const CHECK_AUTH_DEBOUNCE: Duration = Duration::from_secs(5);

/// Where the session sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No identity, nothing in flight.
    Anonymous,
    /// A login or profile update is in flight.
    Authenticating,
    /// A session restore (profile fetch against a persisted token) is in
    /// flight.
    Restoring,
    /// Identity present and believed valid.
    Authenticated,
    /// The last operation failed; identity absent or stale.
    Error,
}

/// A point-in-time copy of the session state.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub admin: Option<Admin>,
    pub phase: SessionPhase,
    pub error: Option<String>,
}

impl SessionSnapshot {
    #[must_use]
    pub fn loading(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Authenticating | SessionPhase::Restoring
        )
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.admin.is_some()
    }
}

struct SessionState {
    admin: Option<Admin>,
    phase: SessionPhase,
    error: Option<String>,
    last_check: Option<Instant>,
}

/// Owner of the authentication state.
pub struct SessionStore {
    api: Arc<ApiClient>,
    state: Mutex<SessionState>,
    debounce: Duration,
}

impl SessionStore {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self::with_debounce(api, CHECK_AUTH_DEBOUNCE)
    }

    /// Overrides the session-check debounce window. Tests use this to step
    /// past the suppression without waiting out real time.
    pub fn with_debounce(api: Arc<ApiClient>, debounce: Duration) -> Self {
        Self {
            api,
            state: Mutex::new(SessionState {
                admin: None,
                phase: SessionPhase::Anonymous,
                error: None,
                last_check: None,
            }),
            debounce,
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Authenticates and adopts the returned identity. The token is
    /// persisted by the API client as part of the login call.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Admin> {
        {
            let mut state = self.state();
            state.phase = SessionPhase::Authenticating;
            state.error = None;
        }
        match self.api.login(email, password).await {
            Ok(response) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    admin = %response.admin.username,
                    "login succeeded"
                );
                let mut state = self.state();
                state.admin = Some(response.admin.clone());
                state.phase = SessionPhase::Authenticated;
                Ok(response.admin)
            }
            Err(err) => {
                tracing::warn!(target: TRACING_TARGET, error = %err, "login failed");
                let mut state = self.state();
                state.admin = None;
                state.phase = SessionPhase::Error;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Drops the session unconditionally: token, identity, debounce stamp.
    /// Never fails.
    pub fn logout(&self) {
        tracing::info!(target: TRACING_TARGET, "logging out");
        self.api.set_token(None);
        let mut state = self.state();
        state.admin = None;
        state.error = None;
        state.phase = SessionPhase::Anonymous;
        state.last_check = None;
    }

    /// Idempotent session restore.
    ///
    /// No-op when called again within the debounce window. With no persisted
    /// token the session is anonymous. Otherwise the token is validated with
    /// a profile fetch: a 401 invalidates the session and clears the token;
    /// any other failure is treated as transient and leaves the identity
    /// untouched.
    pub async fn check_auth(&self) {
        {
            let mut state = self.state();
            if let Some(last) = state.last_check {
                if last.elapsed() < self.debounce {
                    tracing::debug!(target: TRACING_TARGET, "session check debounced");
                    return;
                }
            }
            state.last_check = Some(Instant::now());
        }

        let Some(_token) = self.api.restore_token() else {
            let mut state = self.state();
            state.admin = None;
            state.phase = SessionPhase::Anonymous;
            return;
        };

        {
            let mut state = self.state();
            state.phase = SessionPhase::Restoring;
        }

        match self.api.get_profile().await {
            Ok(admin) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    admin = %admin.username,
                    "session restored"
                );
                let mut state = self.state();
                state.admin = Some(admin);
                state.phase = SessionPhase::Authenticated;
            }
            Err(err) if err.is_unauthorized() => {
                // The 401 already cleared the token inside the client.
                tracing::info!(target: TRACING_TARGET, "persisted token rejected");
                let mut state = self.state();
                state.admin = None;
                state.phase = SessionPhase::Anonymous;
            }
            Err(err) => {
                // Transient trouble is not a logout trigger.
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %err,
                    "session check failed, keeping current identity"
                );
                let mut state = self.state();
                state.phase = if state.admin.is_some() {
                    SessionPhase::Authenticated
                } else {
                    SessionPhase::Anonymous
                };
            }
        }
    }

    /// Applies a partial profile update, adopting the merged identity.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<Admin> {
        {
            let mut state = self.state();
            state.phase = SessionPhase::Authenticating;
            state.error = None;
        }
        match self.api.update_profile(request).await {
            Ok(admin) => {
                let mut state = self.state();
                state.admin = Some(admin.clone());
                state.phase = SessionPhase::Authenticated;
                Ok(admin)
            }
            Err(err) => {
                let mut state = self.state();
                state.phase = SessionPhase::Error;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();
        SessionSnapshot {
            admin: state.admin.clone(),
            phase: state.phase,
            error: state.error.clone(),
        }
    }

    pub fn admin(&self) -> Option<Admin> {
        self.state().admin.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().admin.is_some()
    }
}
