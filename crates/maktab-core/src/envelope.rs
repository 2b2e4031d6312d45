//! The uniform response envelope spoken by the backend.
//!
//! Every endpoint answers with the same wrapper:
//!
//! ```json
//! {
//!   "success": true,
//!   "data": { ... },
//!   "pagination": { "page": 1, "limit": 10, "total": 42, "pages": 5 },
//!   "error": "optional error text",
//!   "message": "optional human-readable text",
//!   "errors": { "field": "field-level message" }
//! }
//! ```
//!
//! On `success: true` the caller takes `data` (and `pagination` when
//! present); on `success: false` the failure text is resolved in priority
//! order `error` then `message`, falling back to a generic string.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{ApiError, ApiResult};
use crate::pagination::{PageInfo, Paginated};

/// Fallback failure text when the backend reports `success: false` without
/// populating `error` or `message`.
pub const GENERIC_FAILURE: &str = "API request failed";

/// The backend's response wrapper.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub pagination: Option<PageInfo>,
}

impl<T> Envelope<T> {
    /// The failure text for a `success: false` envelope: `error`, then
    /// `message`, then [`GENERIC_FAILURE`].
    pub fn failure_message(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }

    /// Unwraps the payload of a non-paginated response.
    pub fn into_data(self) -> ApiResult<T> {
        if !self.success {
            return Err(ApiError::api(self.failure_message()));
        }
        self.data
            .ok_or_else(|| ApiError::api("response envelope carried no data"))
    }

    /// Unwraps a response whose payload is irrelevant (mutations returning
    /// nothing of interest).
    pub fn into_unit(self) -> ApiResult<()> {
        if !self.success {
            return Err(ApiError::api(self.failure_message()));
        }
        Ok(())
    }
}

impl<T> Envelope<Vec<T>> {
    /// Unwraps the payload and pagination block of a list response.
    pub fn into_paginated(self) -> ApiResult<Paginated<T>> {
        if !self.success {
            return Err(ApiError::api(self.failure_message()));
        }
        let pagination = self
            .pagination
            .ok_or_else(|| ApiError::api("response envelope carried no pagination block"))?;
        let data = self
            .data
            .ok_or_else(|| ApiError::api("response envelope carried no data"))?;
        Ok(Paginated { data, pagination })
    }
}
