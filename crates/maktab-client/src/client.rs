//! The authenticated HTTP gateway.
//!
//! [`ApiClient`] is the sole network boundary: every backend call flows
//! through it. It signs requests with the cached bearer token, unwraps the
//! uniform response envelope, normalizes failures into [`ApiError`], and
//! runs the authentication-expiry protocol: on any HTTP 401 the token is
//! cleared from both the cache and the [`TokenStore`], and an injected
//! authentication-lost hook is invoked so the hosting shell can decide
//! navigation. The client itself never navigates and never retries the
//! rejected request.

use std::sync::{Arc, PoisonError, RwLock};

use reqwest::{Method, RequestBuilder, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use maktab_config::ApiConfig;
use maktab_core::envelope::Envelope;
use maktab_core::errors::{ApiError, ApiResult};
use maktab_core::pagination::Paginated;
use maktab_core::retry::RetryPolicy;

use crate::token::TokenStore;

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "maktab_client::api";

type AuthLostHook = Arc<dyn Fn() + Send + Sync>;

/// The single HTTP gateway to the backend.
///
/// Constructed once per process; shared behind an `Arc` by the session and
/// view stores. The cached token mirrors the [`TokenStore`] entry, which
/// stays the single source of truth on disk.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
    tokens: TokenStore,
    auth_lost: RwLock<Option<AuthLostHook>>,
    pub(crate) profile_retry: RetryPolicy,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates the gateway, seeding the token cache from the store.
    pub fn new(config: &ApiConfig, tokens: TokenStore) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|err| ApiError::transport(err.to_string()))?;

        let token = tokens.get();
        tracing::debug!(
            target: TRACING_TARGET,
            base_url = %config.base_url,
            token_present = token.is_some(),
            "API client created"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(token),
            tokens,
            auth_lost: RwLock::new(None),
            profile_retry: RetryPolicy::new(config.profile_retry_attempts, config.profile_retry_delay),
        })
    }

    /// The currently cached bearer token.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-reads the durable store and adopts whatever it holds.
    ///
    /// Session restore calls this instead of trusting the cache so a token
    /// written or expired since construction is observed.
    pub fn restore_token(&self) -> Option<String> {
        let token = self.tokens.get();
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token.clone();
        token
    }

    /// Updates the cached token and the durable store together.
    pub fn set_token(&self, token: Option<&str>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) =
            token.map(str::to_string);
        self.tokens.set(token);
    }

    /// Installs the hook invoked after a 401 has cleared the token.
    pub fn on_auth_lost(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self
            .auth_lost
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(hook));
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn handle_unauthorized(&self) {
        tracing::warn!(
            target: TRACING_TARGET,
            "authentication rejected by backend, clearing session token"
        );
        self.set_token(None);
        let hook = self
            .auth_lost
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Sends one request and returns the raw body of a non-401 response.
    ///
    /// Failure normalization, in priority order: the backend's structured
    /// `error` field, its `message` field, the transport error's own
    /// message, a generic fallback.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        prepare: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<Vec<u8>> {
        let request_id = Uuid::new_v4();
        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            method = %method,
            path,
            "dispatching request"
        );

        let mut builder = self.http.request(method, self.url(path));
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        builder = prepare(builder);

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                target: TRACING_TARGET,
                request_id = %request_id,
                path,
                "request rejected with 401"
            );
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }

        let body = response.bytes().await.map_err(transport_error)?;

        if !status.is_success() {
            tracing::warn!(
                target: TRACING_TARGET,
                request_id = %request_id,
                path,
                status = status.as_u16(),
                "request failed"
            );
            // The backend wraps even failures in the envelope; prefer its
            // wording when it is decodable.
            if let Ok(envelope) = serde_json::from_slice::<Envelope<serde_json::Value>>(&body) {
                if envelope.error.is_some() || envelope.message.is_some() {
                    return Err(ApiError::api(envelope.failure_message()));
                }
            }
            return Err(ApiError::transport(format!(
                "request failed with status {status}"
            )));
        }

        tracing::debug!(
            target: TRACING_TARGET,
            request_id = %request_id,
            path,
            status = status.as_u16(),
            "request completed"
        );
        Ok(body.to_vec())
    }

    /// One call returning the envelope's payload.
    pub(crate) async fn request<T, F>(&self, method: Method, path: &str, prepare: F) -> ApiResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let body = self.execute(method, path, prepare).await?;
        let envelope: Envelope<T> = serde_json::from_slice(&body)?;
        envelope.into_data()
    }

    /// One call returning the envelope's payload plus its pagination block.
    pub(crate) async fn request_paginated<T, F>(
        &self,
        method: Method,
        path: &str,
        prepare: F,
    ) -> ApiResult<Paginated<T>>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let body = self.execute(method, path, prepare).await?;
        let envelope: Envelope<Vec<T>> = serde_json::from_slice(&body)?;
        envelope.into_paginated()
    }

    /// One call where only success matters.
    pub(crate) async fn request_unit<F>(
        &self,
        method: Method,
        path: &str,
        prepare: F,
    ) -> ApiResult<()>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let body = self.execute(method, path, prepare).await?;
        let envelope: Envelope<serde_json::Value> = serde_json::from_slice(&body)?;
        envelope.into_unit()
    }

    /// Maps client-side validation failures into the API error taxonomy so
    /// callers see one error type. Never sent over the wire.
    pub(crate) fn reject_invalid(request: &impl validator::Validate) -> ApiResult<()> {
        request
            .validate()
            .map_err(|err| ApiError::api(err.to_string()))
    }
}

/// Serializes `query` onto the builder; the empty case attaches nothing.
pub(crate) fn with_query<Q: Serialize>(query: Q) -> impl FnOnce(RequestBuilder) -> RequestBuilder {
    move |builder| builder.query(&query)
}

/// Serializes `body` as the JSON request body.
pub(crate) fn with_json<B: Serialize>(body: B) -> impl FnOnce(RequestBuilder) -> RequestBuilder {
    move |builder| builder.json(&body)
}

fn transport_error(err: reqwest::Error) -> ApiError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.to_string()
    };
    ApiError::transport(message)
}
