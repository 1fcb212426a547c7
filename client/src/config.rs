//! Client configuration parsed from environment variables.
//!
//! The backend base URL is the only required value; without it the API layer
//! refuses to start.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

pub const API_URL_ENV: &str = "RELIANCE_API_URL";
pub const STATE_DIR_ENV: &str = "RELIANCE_STATE_DIR";
pub const TIMEOUT_ENV: &str = "RELIANCE_TIMEOUT_SECS";

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATE_DIR_NAME: &str = ".reliance";

/// Errors raised while building a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `RELIANCE_API_URL` is unset or blank.
    #[error("RELIANCE_API_URL is not set; the API layer needs a backend base URL")]
    MissingBaseUrl,

    /// The base URL is not an `http://` or `https://` URL.
    #[error("invalid base URL `{0}` (expected http:// or https://)")]
    InvalidBaseUrl(String),

    /// The request timeout is not a positive number of seconds.
    #[error("invalid RELIANCE_TIMEOUT_SECS value `{0}`")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL. Its path always ends in `/`, so relative joins keep
    /// any path prefix.
    pub base_url: Url,
    /// Directory holding the persisted session token.
    pub state_dir: PathBuf,
    /// Upper bound for a single request, connect through body.
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Build a config for `base_url` with default state dir and timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is blank or not an HTTP(S) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let trimmed = base_url.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }
        Ok(Self {
            base_url: parse_base_url(trimmed)?,
            state_dir: default_state_dir(std::env::var("HOME").ok().as_deref()),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `RELIANCE_API_URL`
    ///
    /// Optional:
    /// - `RELIANCE_STATE_DIR`: default `$HOME/.reliance`
    /// - `RELIANCE_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or any value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] but reads values through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or any value fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(API_URL_ENV)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = parse_base_url(&raw_url)?;

        let state_dir = lookup(STATE_DIR_ENV)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .map_or_else(|| default_state_dir(lookup("HOME").as_deref()), PathBuf::from);

        let request_timeout = match lookup(TIMEOUT_ENV) {
            Some(raw) => parse_timeout(&raw)?,
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        Ok(Self { base_url, state_dir, request_timeout })
    }

    #[must_use]
    pub fn with_state_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.state_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let invalid = || ConfigError::InvalidBaseUrl(raw.to_owned());
    let mut url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none_or(str::is_empty) {
        return Err(invalid());
    }
    url.set_query(None);
    url.set_fragment(None);
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_owned()))
}

fn default_state_dir(home: Option<&str>) -> PathBuf {
    match home.map(str::trim).filter(|home| !home.is_empty()) {
        Some(home) => Path::new(home).join(DEFAULT_STATE_DIR_NAME),
        None => PathBuf::from(DEFAULT_STATE_DIR_NAME),
    }
}
