//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const BASE_URL_VAR: &str = "RIDESHARE_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "RIDESHARE_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "RIDESHARE_CONNECT_TIMEOUT_SECS";
pub const SESSION_FILE_VAR: &str = "RIDESHARE_SESSION_FILE";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a whole number of seconds")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("invalid base URL: {0} (expected http:// or https://)")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without a trailing slash.
    pub base_url: String,
    pub timeouts: Timeouts,
    /// Where the session survives between runs. `None` keeps it in memory.
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_owned(), timeouts: Timeouts::default(), session_file: None }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `RIDESHARE_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `RIDESHARE_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RIDESHARE_CONNECT_TIMEOUT_SECS`: default 10
    /// - `RIDESHARE_SESSION_FILE`: unset keeps the session in memory
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not a number or the base URL has no
    /// http(s) scheme.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = normalize_base_url(&lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()))?;
        let timeouts = Timeouts {
            request_secs: parse_secs(REQUEST_TIMEOUT_VAR, lookup(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_secs(CONNECT_TIMEOUT_VAR, lookup(CONNECT_TIMEOUT_VAR), DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        let session_file = lookup(SESSION_FILE_VAR)
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self { base_url, timeouts, session_file })
    }
}

/// Trim whitespace and trailing slashes; require an http(s) scheme.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBaseUrl`] for any other scheme.
pub fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn parse_secs(var: &'static str, raw: Option<String>, default: u64) -> Result<u64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidTimeout { var, value: raw })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
