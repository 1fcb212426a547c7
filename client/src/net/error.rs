//! Failure taxonomy for calls to the backend.
//!
//! ERROR HANDLING
//! ==============
//! Every call resolves to one discriminated [`ApiError`] so views can choose a
//! message without inspecting transport details. Authorization failures have
//! already cleared the session by the time a caller sees them.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub const NETWORK_MESSAGE: &str = "Unable to reach the server. Please check your connection and try again.";

/// Errors produced by [`crate::net::http::ApiClient`] and the domain APIs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered 401; the stored token has been cleared.
    #[error("unauthorized")]
    Unauthorized,

    /// No response was received (connect failure, timeout, dropped body).
    #[error("network unreachable: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("server returned status {status}")]
    Server { status: u16, message: Option<String> },

    /// A success body could not be decoded into the expected type.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The request could not be assembled.
    #[error("request build failed: {0}")]
    Build(String),

    /// The session token could not be persisted.
    #[error("session storage failed: {0}")]
    Storage(String),
}

impl ApiError {
    /// HTTP status carried by the failure, if a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { status: 408 | 429 | 500..=599, .. })
    }

    /// User-facing text: the server's message when it sent one, a network
    /// notice when nothing came back, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Network(_) => NETWORK_MESSAGE.to_owned(),
            Self::Server { message: Some(message), .. } => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"message": ".."}` or `{"error": ".."}`; anything else yields `None`.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}
