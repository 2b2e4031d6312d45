//! Current location and redirect handling.
//!
//! The console keeps a notion of "where the operator is" so the routing
//! contract can be enforced the way the web shell enforced it: admin paths
//! require a token, the login entry point bounces authenticated visitors
//! back inside, and a session lost while inside the admin section forces a
//! trip to the login entry point. The API client only reports that the
//! session was lost; navigation is decided here.

use std::sync::{Mutex, PoisonError};

use maktab_core::routes::{self, RouteAction};

/// Tracing target for navigation events.
pub const TRACING_TARGET: &str = "maktab::navigator";

/// Tracks the operator's current location.
#[derive(Debug)]
pub struct Navigator {
    location: Mutex<String>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Starts at the public root.
    pub fn new() -> Self {
        Self {
            location: Mutex::new("/".to_string()),
        }
    }

    pub fn location(&self) -> String {
        self.location
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn navigate(&self, path: &str) {
        tracing::debug!(target: TRACING_TARGET, path, "navigating");
        *self.location.lock().unwrap_or_else(PoisonError::into_inner) = path.to_string();
    }

    /// The edge gate: applies [`routes::guard`] before entering `path` and
    /// performs whatever redirect it decides.
    pub fn enter(&self, path: &str, has_token: bool) -> RouteAction {
        let action = routes::guard(path, has_token);
        match action {
            RouteAction::Continue => self.navigate(path),
            RouteAction::RedirectToLogin => {
                tracing::info!(
                    target: TRACING_TARGET,
                    path,
                    "no token, redirecting to login"
                );
                self.navigate(routes::LOGIN_PATH);
            }
            RouteAction::RedirectToAdmin => {
                tracing::info!(
                    target: TRACING_TARGET,
                    "token present on login page, redirecting into admin"
                );
                self.navigate(routes::ADMIN_SECTION);
            }
        }
        action
    }

    /// Invoked by the API client after a 401 has cleared the token: inside
    /// the admin section this forces the login entry point, anywhere else
    /// the visitor stays put.
    pub fn handle_auth_lost(&self) {
        let location = self.location();
        if routes::is_admin_path(&location) {
            tracing::warn!(
                target: TRACING_TARGET,
                location,
                "session lost inside the admin section, forcing login"
            );
            self.navigate(routes::LOGIN_PATH);
        } else {
            tracing::debug!(
                target: TRACING_TARGET,
                location,
                "session lost outside the admin section"
            );
        }
    }
}
