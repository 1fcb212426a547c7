//! The single configured HTTP client wrapper.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every domain API call goes through [`ApiClient::send`]. It attaches the
//! bearer token read from the session at send time, applies the call's retry
//! policy, and funnels every response through one classification step.
//!
//! ERROR HANDLING
//! ==============
//! A 401 clears the session here and surfaces as [`ApiError::Unauthorized`].
//! Navigation is not this module's concern: the top-level navigator observes
//! the session transition and decides where to go.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::{ApiError, extract_message};
use super::retry::{self, RetryPolicy};
use super::types::MediaUpload;
use crate::config::ClientConfig;
use crate::state::session::SessionStore;

const CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// CALL
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(MediaUpload),
}

/// One request description: verb, path, body, and retry policy.
///
/// Kept as plain data so a retry can rebuild the request from scratch.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    method: Method,
    path: String,
    body: Body,
    retry: RetryPolicy,
}

impl Call {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), body: Body::Empty, retry: RetryPolicy::NONE }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Build`] if `body` cannot be serialized.
    pub fn json<B: Serialize>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Build(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, upload: MediaUpload) -> Self {
        self.body = Body::Multipart(upload);
        self
    }

    #[must_use]
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }
}

fn multipart_form(upload: &MediaUpload) -> Result<reqwest::multipart::Form, ApiError> {
    let media = reqwest::multipart::Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(upload.mime)
        .map_err(|e| ApiError::Build(e.to_string()))?;
    Ok(reqwest::multipart::Form::new()
        .text("title", upload.title.clone())
        .text("caption", upload.caption.clone())
        .part("media", media))
}

// =============================================================================
// CLIENT
// =============================================================================

/// Configured backend client. Cheap to clone; clones share the connection
/// pool and the session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Build the client for `config`, reading tokens from `session`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Build`] if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, ApiError> {
        let connect_timeout = Duration::from_secs(CONNECT_TIMEOUT_SECS).min(config.request_timeout);
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| ApiError::Build(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), session })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL for an API path, kept under the base URL's path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolve a media URL.
    ///
    /// Absolute URLs pass through in any scheme case, protocol-relative
    /// `//host/...` URLs take the base's scheme, and paths resolve under the
    /// base URL's path.
    pub fn media_url(&self, path: &str) -> String {
        let path = path.trim();
        let relative = if path.starts_with("//") { path } else { path.trim_start_matches('/') };
        match Url::parse(path).or_else(|_| self.base_url.join(relative)) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::debug!(path, error = %e, "media url did not resolve");
                self.endpoint(path)
            }
        }
    }

    /// Issue `call` and decode a success body into `T`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the last attempt, or
    /// [`ApiError::Decode`] if a success body does not match `T`.
    pub async fn send<T: DeserializeOwned>(&self, call: &Call) -> Result<T, ApiError> {
        let body = self.send_text(call).await?;
        decode_body(&body)
    }

    /// Issue `call` and return a success body as raw text.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the last attempt.
    pub async fn send_text(&self, call: &Call) -> Result<String, ApiError> {
        retry::run(call.retry, || self.send_once(call)).await
    }

    async fn send_once(&self, call: &Call) -> Result<String, ApiError> {
        let url = self.endpoint(&call.path);
        let mut request = self.http.request(call.method.clone(), &url);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        request = match &call.body {
            Body::Empty => request,
            Body::Json(value) => request.json(value),
            Body::Multipart(upload) => request.multipart(multipart_form(upload)?),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %call.method, path = %call.path, error = %e, "no response from backend");
            ApiError::Network(e.to_string())
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::debug!(method = %call.method, path = %call.path, status, "backend responded");
        self.classify(status, body)
    }

    /// Turn a received status + body into the call's result.
    fn classify(&self, status: u16, body: String) -> Result<String, ApiError> {
        if (200..300).contains(&status) {
            return Ok(body);
        }
        if status == 401 {
            self.expire_session();
            return Err(ApiError::Unauthorized);
        }
        Err(ApiError::Server { status, message: extract_message(&body) })
    }

    fn expire_session(&self) {
        match self.session.clear() {
            Ok(true) => tracing::info!("backend rejected token; session ended"),
            Ok(false) => tracing::debug!("401 received without an active session"),
            Err(e) => tracing::warn!(error = %e, "session ended but token file could not be removed"),
        }
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let trimmed = body.trim();
    let source = if trimmed.is_empty() { "null" } else { trimmed };
    serde_json::from_str(source).map_err(|e| ApiError::Decode(e.to_string()))
}
