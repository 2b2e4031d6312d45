//! # Maktab Config
//!
//! Configuration types for the Maktab admin client.
//!
//! This crate provides configuration structures loaded from environment
//! variables:
//!
//! - [`api`]: backend base URL, request timeout, and retry knobs
//! - [`environment`]: deployment environment (drives the secure flag on the
//!   persisted token)
//! - [`storage`]: where client-side state lives on disk
//!
//! # Example
//!
//! ```ignore
//! use maktab_config::{ApiConfig, Environment, StorageConfig};
//!
//! // Load all configs from environment
//! let api_config = ApiConfig::from_env();
//! let environment = Environment::from_env();
//! let storage_config = StorageConfig::from_env();
//! ```

pub mod api;
pub mod environment;
pub mod storage;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use environment::Environment;
pub use storage::StorageConfig;
