//! # Maktab Client
//!
//! The network boundary of the Maktab admin client: durable token
//! persistence plus the authenticated HTTP gateway every backend call goes
//! through.
//!
//! - [`token`]: the persisted `auth_token` slot (the browser-cookie analogue)
//! - [`client`]: [`ApiClient`], the single HTTP gateway: request signing,
//!   envelope unwrapping, and the authentication-expiry protocol
//!
//! Per-resource operations live in `impl ApiClient` blocks, one module per
//! backend resource family (auth, classes, teachers, registrations).
//!
//! # Example
//!
//! ```ignore
//! use maktab_client::{ApiClient, TokenStore};
//! use maktab_config::{ApiConfig, Environment, StorageConfig};
//!
//! let tokens = TokenStore::new(&StorageConfig::from_env(), Environment::from_env());
//! let api = ApiClient::new(&ApiConfig::from_env(), tokens)?;
//!
//! let session = api.login("admin@example.com", "secret").await?;
//! let classes = api.list_classes(Some(8)).await?;
//! ```

pub mod client;
pub mod token;

mod auth;
mod classes;
mod registrations;
mod teachers;

pub use client::ApiClient;
pub use token::TokenStore;
