//! HTTP client settings and API addressing.
//!
//! This module holds the fixed API host and version, the account path layout,
//! and the tuning applied when building the default HTTP client.

use std::time::Duration;

/// Root host of the Twilio REST API.
pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// API version path segment.
pub const API_VERSION: &str = "2010-04-01";

/// Request timeout (seconds) used when a [`crate::TwilioConfig`] does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Account-scoped root path: `/<version>/Accounts/<account_sid>`.
#[must_use]
pub fn account_root(account_sid: &str) -> String {
    format!("/{API_VERSION}/Accounts/{account_sid}")
}

/// HTTP client configuration.
///
/// Applied by the default transport provider when it builds its HTTP client.
/// The default leaves every setting at the HTTP client's own defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Request timeout, unbounded when `None`
    pub timeout: Option<Duration>,

    /// TCP connect timeout, unbounded when `None`
    pub connect_timeout: Option<Duration>,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_root() {
        assert_eq!(account_root("AC123"), "/2010-04-01/Accounts/AC123");
        assert_eq!(account_root(""), "/2010-04-01/Accounts/");
    }

    #[test]
    fn test_client_config_new() {
        let config = ClientConfig::new();
        assert_eq!(config.timeout, None);
        assert_eq!(config.connect_timeout, None);
        assert!(config.enable_compression);
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_connect_timeout(Duration::from_secs(2))
            .with_compression(false);

        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(2)));
        assert!(!config.enable_compression);
    }
}
