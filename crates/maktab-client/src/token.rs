//! The persisted authentication token.
//!
//! The browser build of this application kept the bearer token in a cookie
//! named `auth_token` (7-day expiry, `SameSite=Strict`, `Secure` outside
//! local development, path `/`). This store keeps the same entry, attributes
//! included, as a single JSON document in the configured state directory.
//! The attributes are live data, not decoration: expiry is checked on every
//! read, and the secure flag is derived from the deployment environment.
//!
//! The store is the single source of truth for the token on disk. It never
//! fails: a missing, unreadable, or expired entry reads back as absent, and
//! write problems are logged and swallowed.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use maktab_config::{Environment, StorageConfig};

/// Tracing target for token store operations.
pub const TRACING_TARGET: &str = "maktab_client::token";

/// Name of the persisted entry, kept from the cookie it replaces.
pub const TOKEN_NAME: &str = "auth_token";

/// Fixed lifetime of a persisted token, matching the backend's token expiry.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredToken {
    name: String,
    value: String,
    expires_at: DateTime<Utc>,
    same_site: String,
    secure: bool,
    path: String,
}

/// Durable slot for the bearer token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    /// `None` when the process has no state directory (headless execution);
    /// every read then answers absent and writes are dropped.
    slot: Option<PathBuf>,
    secure: bool,
}

impl TokenStore {
    pub fn new(storage: &StorageConfig, environment: Environment) -> Self {
        Self {
            slot: Some(storage.state_dir.join(format!("{TOKEN_NAME}.json"))),
            secure: environment.is_production(),
        }
    }

    /// A store with no backing slot: `get` answers `None`, `set` and
    /// `remove` do nothing.
    pub fn detached() -> Self {
        Self {
            slot: None,
            secure: false,
        }
    }

    /// Reads the current token, if one is present and unexpired.
    pub fn get(&self) -> Option<String> {
        let slot = self.slot.as_ref()?;
        let bytes = fs::read(slot).ok()?;
        let entry: StoredToken = match serde_json::from_slice(&bytes) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %err,
                    "stored token entry is unreadable, treating as absent"
                );
                return None;
            }
        };
        if entry.expires_at <= Utc::now() {
            tracing::debug!(target: TRACING_TARGET, "stored token has expired");
            self.remove();
            return None;
        }
        Some(entry.value)
    }

    /// Writes or removes the token. Writing stamps the fixed expiry and the
    /// same-site/secure attributes.
    pub fn set(&self, token: Option<&str>) {
        let Some(slot) = self.slot.as_ref() else {
            return;
        };
        match token {
            Some(value) => {
                let entry = StoredToken {
                    name: TOKEN_NAME.to_string(),
                    value: value.to_string(),
                    expires_at: Utc::now() + Duration::days(TOKEN_TTL_DAYS),
                    same_site: "strict".to_string(),
                    secure: self.secure,
                    path: "/".to_string(),
                };
                let write = serde_json::to_vec_pretty(&entry)
                    .map_err(|err| err.to_string())
                    .and_then(|bytes| {
                        if let Some(parent) = slot.parent() {
                            fs::create_dir_all(parent).map_err(|err| err.to_string())?;
                        }
                        fs::write(slot, bytes).map_err(|err| err.to_string())
                    });
                if let Err(err) = write {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        error = %err,
                        "failed to persist token"
                    );
                } else {
                    tracing::debug!(target: TRACING_TARGET, "token persisted");
                }
            }
            None => {
                if let Err(err) = fs::remove_file(slot) {
                    if err.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(
                            target: TRACING_TARGET,
                            error = %err,
                            "failed to remove persisted token"
                        );
                    }
                } else {
                    tracing::debug!(target: TRACING_TARGET, "token removed");
                }
            }
        }
    }

    /// Equivalent to `set(None)`.
    pub fn remove(&self) {
        self.set(None);
    }
}
