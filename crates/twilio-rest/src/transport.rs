//! HTTP transport providers.
//!
//! A [`TransportProvider`] hands out the `reqwest::Client` used to execute a
//! request. Clients receive their provider at construction, so tests and
//! callers can substitute instrumented or proxied HTTP clients without
//! touching any shared state.

use crate::Result;
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use tracing::debug;
use twilio_core::{ClientConfig, Error, RequestContext};

const USER_AGENT: &str = concat!("twilio-rest/", env!("CARGO_PKG_VERSION"));

/// Source of HTTP clients for request execution.
///
/// Called once per request with the issuing client's context.
#[cfg_attr(test, mockall::automock)]
pub trait TransportProvider: Send + Sync {
    /// Return the HTTP client that will execute a request made under `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP client can be produced.
    fn http_client(&self, context: &RequestContext) -> Result<Client>;
}

/// Provider returning a plain HTTP client built from [`ClientConfig`].
///
/// The client is built on first use and shared by every later request.
#[derive(Debug)]
pub struct DefaultTransportProvider {
    config: ClientConfig,
    http: OnceLock<Client>,
}

impl DefaultTransportProvider {
    /// Create a provider using the given HTTP settings.
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: OnceLock::new(),
        }
    }

    /// HTTP settings applied to the client.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn build(&self) -> Result<Client> {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);

        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if !self.config.enable_compression {
            builder = builder.no_gzip();
        }

        builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))
    }
}

impl Default for DefaultTransportProvider {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl TransportProvider for DefaultTransportProvider {
    fn http_client(&self, _context: &RequestContext) -> Result<Client> {
        if let Some(http) = self.http.get() {
            return Ok(http.clone());
        }

        let http = self.build()?;
        debug!(timeout = ?self.config.timeout, "built default HTTP client");
        Ok(self.http.get_or_init(|| http).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn default_provider_uses_default_config() {
        let provider = DefaultTransportProvider::default();
        assert_eq!(provider.config(), &ClientConfig::default());
        assert_eq!(provider.config().timeout, None);
        assert_eq!(provider.config().connect_timeout, None);
    }

    #[test]
    fn default_provider_builds_client_once() {
        let provider =
            DefaultTransportProvider::new(ClientConfig::new().with_timeout(Duration::from_secs(3)));
        let ctx = RequestContext::new();

        provider.http_client(&ctx).unwrap();
        assert!(provider.http.get().is_some());
        provider.http_client(&ctx).unwrap();
    }

    #[tokio::test]
    async fn default_provider_sets_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let http = DefaultTransportProvider::default()
            .http_client(&RequestContext::new())
            .unwrap();
        let response = http.get(server.uri()).send().await.unwrap();
        assert_eq!(response.status(), 200);
    }
}
