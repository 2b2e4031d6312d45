//! # Maktab Core
//!
//! Core types, errors, and utilities for the Maktab admin client.
//!
//! This crate provides the foundational pieces shared by the API client and
//! the view stores:
//!
//! - [`errors`]: the client-side error taxonomy
//! - [`envelope`]: the uniform response envelope spoken by the backend
//! - [`pagination`]: pagination metadata for list responses
//! - [`retry`]: retry policy for transient network failures
//! - [`routes`]: the admin-section routing contract
//!
//! # Example
//!
//! ```ignore
//! use maktab_core::{ApiError, ApiResult, Envelope, Paginated};
//! use maktab_core::routes::{guard, RouteAction};
//!
//! // Decode a backend response
//! let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&body)?;
//!
//! // Decide where an unauthenticated visitor goes
//! assert_eq!(guard("/admin/dashboard", false), RouteAction::RedirectToLogin);
//! ```

pub mod envelope;
pub mod errors;
pub mod pagination;
pub mod retry;
pub mod routes;

// Re-export commonly used types at crate root
pub use envelope::Envelope;
pub use errors::{ApiError, ApiResult};
pub use pagination::{PageInfo, Paginated};
pub use retry::RetryPolicy;
