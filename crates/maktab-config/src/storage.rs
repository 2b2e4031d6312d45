//! Client-side state location.

use std::env;
use std::path::PathBuf;

/// Where durable client-side state (the persisted auth token) lives.
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub state_dir: PathBuf,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let state_dir = env::var("MAKTAB_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".maktab"));

        Self { state_dir }
    }

    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }
}
