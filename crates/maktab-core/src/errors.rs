//! Client-side error taxonomy.
//!
//! Every failure surfaced by the API client is one of four kinds:
//!
//! - [`ApiError::Api`]: the backend answered with `success: false`; the
//!   message is the backend's own wording and is surfaced verbatim.
//! - [`ApiError::Unauthorized`]: the backend answered HTTP 401; handled as a
//!   distinct control-flow path (token invalidation), never as a generic
//!   error.
//! - [`ApiError::Transport`]: the request never produced a usable response
//!   (timeout, connection failure, HTTP-layer error without a decodable
//!   envelope). The only kind that is ever retried.
//! - [`ApiError::Decode`]: the response body did not match the envelope
//!   contract.

use thiserror::Error;

/// Result alias for API client operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors produced by the API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend reported a failure through the response envelope.
    #[error("{message}")]
    Api { message: String },

    /// The backend rejected the bearer token (HTTP 401).
    #[error("authentication expired")]
    Unauthorized,

    /// The request failed below the envelope layer.
    #[error("{message}")]
    Transport { message: String },

    /// The response body could not be decoded as an envelope.
    #[error("unexpected response shape: {source}")]
    Decode {
        #[from]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Only transport-layer failures qualify. A 401 is a confirmed session
    /// loss and a `success: false` envelope is a deliberate backend answer;
    /// retrying either would not change the outcome.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
