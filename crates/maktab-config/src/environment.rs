//! Deployment environment.

use std::env;

/// Which deployment the client is running against.
///
/// The only behavioral difference is the secure flag on the persisted token
/// entry: it is set everywhere except local development.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("MAKTAB_ENV").as_deref() {
            Ok("production") | Ok("prod") => Self::Production,
            _ => Self::Development,
        }
    }

    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}
