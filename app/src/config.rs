//! Configuration management for the todo client.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Call `dotenvy::dotenv()` first to pick up a local `.env` file.

use crate::types::UserId;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://mate.academy/students-api";

/// Errors raised while loading configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `TODOS_USER_ID` is not set
    #[error("TODOS_USER_ID is not set")]
    MissingUserId,

    /// A variable is present but does not parse
    #[error("{key} has invalid value '{value}': {reason}")]
    Invalid {
        /// Variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the todo API (`TODOS_API_URL`)
    pub api_url: String,
    /// Owner of the todo collection (`TODOS_USER_ID`, required)
    pub user_id: u64,
    /// Error banner lifetime in milliseconds (`TODOS_ERROR_TIMEOUT_MS`, default: 3000)
    pub error_timeout_ms: u64,
    /// Per-request timeout in seconds (`TODOS_REQUEST_TIMEOUT_SECS`, default: 10)
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds (`TODOS_SHUTDOWN_TIMEOUT_SECS`, default: 5)
    pub shutdown_timeout_secs: u64,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingUserId`] if `TODOS_USER_ID` is unset, and
    /// [`ConfigError::Invalid`] for any variable that is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let user_id = parse::<u64>(&lookup, "TODOS_USER_ID")?.ok_or(ConfigError::MissingUserId)?;
        if user_id == 0 {
            return Err(ConfigError::Invalid {
                key: "TODOS_USER_ID",
                value: user_id.to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }

        Ok(Self {
            api_url: lookup("TODOS_API_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            user_id,
            error_timeout_ms: parse(&lookup, "TODOS_ERROR_TIMEOUT_MS")?.unwrap_or(3000),
            request_timeout_secs: parse(&lookup, "TODOS_REQUEST_TIMEOUT_SECS")?.unwrap_or(10),
            shutdown_timeout_secs: parse(&lookup, "TODOS_SHUTDOWN_TIMEOUT_SECS")?.unwrap_or(5),
        })
    }

    /// Owner of the todo collection
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::new(self.user_id)
    }

    /// Error banner lifetime
    #[must_use]
    pub const fn error_timeout(&self) -> Duration {
        Duration::from_millis(self.error_timeout_ms)
    }

    /// Per-request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Graceful shutdown timeout
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// `Ok(None)` when unset, an error when set but unparsable
fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                value: value.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
