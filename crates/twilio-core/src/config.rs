//! Configuration structures for Twilio clients.
//!
//! A [`TwilioConfig`] can be built in code, parsed from JSON, or read from the
//! `TWILIO_*` environment variables. Every constructor validates the result.

use crate::client::{ClientConfig, DEFAULT_TIMEOUT_SECS, TWILIO_API_BASE};
use crate::credentials::Credentials;
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;
use validator::Validate;

/// Environment variable holding the account SID.
pub const ENV_ACCOUNT_SID: &str = "TWILIO_ACCOUNT_SID";
/// Environment variable holding the auth token.
pub const ENV_AUTH_TOKEN: &str = "TWILIO_AUTH_TOKEN";
/// Environment variable overriding the API base URL.
pub const ENV_API_BASE: &str = "TWILIO_API_BASE";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "TWILIO_REQUEST_TIMEOUT_SECS";

/// Configuration for a Twilio client instance.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct TwilioConfig {
    /// Account SID
    #[validate(length(min = 1))]
    pub account_sid: String,

    /// Auth token
    #[serde(skip_serializing)]
    #[validate(length(min = 1))]
    pub auth_token: String,

    /// API base URL
    #[validate(url)]
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_base() -> String {
    TWILIO_API_BASE.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl TwilioConfig {
    /// Create a new configuration for the given account.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the SID or token is empty.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
        };

        config.validated()
    }

    /// Parse a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the document is not valid JSON and
    /// [`Error::ValidationError`] if a field is out of range.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration document: {e}")))?;
        config.validated()
    }

    /// Read the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through a variable lookup function.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| Error::ConfigError(format!("{key} is not set")))
        };

        let mut config = Self {
            account_sid: required(ENV_ACCOUNT_SID)?,
            auth_token: required(ENV_AUTH_TOKEN)?,
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
        };

        if let Some(api_base) = lookup(ENV_API_BASE) {
            config.api_base = api_base;
        }
        if let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            config.request_timeout_secs = timeout.trim().parse().map_err(|e| {
                Error::ConfigError(format!("Invalid {ENV_REQUEST_TIMEOUT_SECS} `{timeout}`: {e}"))
            })?;
        }

        debug!(account_sid = %config.account_sid, api_base = %config.api_base, "loaded Twilio configuration");
        config.validated()
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Credentials described by this configuration.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.account_sid.clone(), self.auth_token.clone())
    }

    /// HTTP client settings described by this configuration.
    #[must_use]
    pub const fn client_config(&self) -> ClientConfig {
        ClientConfig::new().with_timeout(self.timeout())
    }

    /// Parse and validate the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_api_base(&self) -> Result<Url, Error> {
        Url::parse(&self.api_base)
            .map_err(|e| Error::ConfigError(format!("Invalid API base URL: {e}")))
    }

    fn validated(self) -> Result<Self, Error> {
        self.validate()?;
        Ok(self)
    }
}

impl fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
