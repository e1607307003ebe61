//! Asynchronous Twilio REST client implementation.

use crate::transport::{DefaultTransportProvider, TransportProvider};
use crate::Result;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response, StatusCode};
use std::sync::Arc;
use tracing::{debug, info};
use twilio_core::{
    account_root, ClientConfig, Credentials, Error, FormValues, RequestContext, TwilioConfig,
    FORM_CONTENT_TYPE, TWILIO_API_BASE,
};
use url::Url;

/// Account-scoped request operations.
///
/// [`TwilioClient`] is the implementation; resource modules can depend on
/// this trait to accept test doubles.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Account SID used for authentication and the account path.
    fn account_sid(&self) -> &str;

    /// Auth token used for authentication.
    fn auth_token(&self) -> &str;

    /// Account root path, `/<version>/Accounts/<account_sid>`.
    fn root_url(&self) -> &str;

    /// Issue a GET request with form-encoded parameters in the body.
    async fn get(&self, params: Option<&FormValues>, path: &str) -> Result<Vec<u8>>;

    /// Issue a POST request with a form-encoded body.
    async fn post(&self, values: &FormValues, path: &str) -> Result<Vec<u8>>;
}

/// Builder for [`TwilioClient`].
#[derive(Clone)]
pub struct TwilioClientBuilder {
    account_sid: String,
    auth_token: String,
    api_base: String,
    context: RequestContext,
    http_config: ClientConfig,
    transport: Option<Arc<dyn TransportProvider>>,
}

impl TwilioClientBuilder {
    /// Create a builder for the given account.
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            api_base: TWILIO_API_BASE.to_string(),
            context: RequestContext::new(),
            http_config: ClientConfig::new(),
            transport: None,
        }
    }

    /// Override the API base URL (protocol and host, e.g. `https://api.twilio.com`).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the execution context passed to the transport provider.
    #[must_use]
    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    /// Override the HTTP settings of the default transport provider.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Use a custom transport provider.
    #[must_use]
    pub fn with_transport<T>(self, transport: T) -> Self
    where
        T: TransportProvider + 'static,
    {
        self.with_shared_transport(Arc::new(transport))
    }

    /// Use a transport provider shared with other clients.
    #[must_use]
    pub fn with_shared_transport(mut self, transport: Arc<dyn TransportProvider>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the API base URL is invalid.
    pub fn build(self) -> Result<TwilioClient> {
        let base = Url::parse(&self.api_base).map_err(|err| {
            Error::ConfigError(format!("Invalid Twilio API base URL `{}`: {err}", self.api_base))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "Twilio API base URL `{}` cannot carry a path",
                self.api_base
            )));
        }

        let transport = self.transport.unwrap_or_else(|| {
            Arc::new(DefaultTransportProvider::new(self.http_config)) as Arc<dyn TransportProvider>
        });

        Ok(TwilioClient::from_parts(
            Credentials::new(self.account_sid, self.auth_token),
            self.api_base.trim_end_matches('/').to_string(),
            self.context,
            transport,
        ))
    }
}

/// Asynchronous Twilio REST client.
///
/// Holds immutable credentials, the account root path and the transport
/// provider. Cloning is cheap and clones share the provider.
#[derive(Clone)]
pub struct TwilioClient {
    credentials: Arc<Credentials>,
    root_url: String,
    api_base: String,
    context: RequestContext,
    transport: Arc<dyn TransportProvider>,
}

impl TwilioClient {
    /// Create a client for the public API using the default transport provider.
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        context: RequestContext,
    ) -> Self {
        Self::from_parts(
            Credentials::new(account_sid, auth_token),
            TWILIO_API_BASE.to_string(),
            context,
            Arc::new(DefaultTransportProvider::default()),
        )
    }

    /// Create a builder for the given account.
    pub fn builder(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> TwilioClientBuilder {
        TwilioClientBuilder::new(account_sid, auth_token)
    }

    /// Create a client from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configured API base URL is invalid.
    pub fn from_config(config: &TwilioConfig) -> Result<Self> {
        TwilioClientBuilder::new(config.account_sid.clone(), config.auth_token.clone())
            .with_api_base(config.api_base.clone())
            .with_http_config(config.client_config())
            .build()
    }

    fn from_parts(
        credentials: Credentials,
        api_base: String,
        context: RequestContext,
        transport: Arc<dyn TransportProvider>,
    ) -> Self {
        let root_url = account_root(credentials.account_sid());
        Self {
            credentials: Arc::new(credentials),
            root_url,
            api_base,
            context,
            transport,
        }
    }

    /// Account SID.
    #[must_use]
    pub fn account_sid(&self) -> &str {
        self.credentials.account_sid()
    }

    /// Auth token.
    #[must_use]
    pub fn auth_token(&self) -> &str {
        self.credentials.auth_token()
    }

    /// Account root path, `/<version>/Accounts/<account_sid>`.
    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// API base URL requests are sent to.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Execution context passed to the transport provider.
    #[must_use]
    pub const fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Account-scoped path for a resource, e.g. `/Messages.json`.
    #[must_use]
    pub fn account_path(&self, resource: &str) -> String {
        format!("{}{resource}", self.root_url)
    }

    /// Issue a GET request.
    ///
    /// `params` are form-encoded and sent as the request body, not the query
    /// string; `None` sends an empty body.
    ///
    /// # Errors
    ///
    /// See [`Error`] for the classification of failed requests.
    pub async fn get(&self, params: Option<&FormValues>, path: &str) -> Result<Vec<u8>> {
        let body = params.map(FormValues::encode).unwrap_or_default();
        self.execute(Method::GET, body, path).await
    }

    /// Issue a POST request with `values` as an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// See [`Error`] for the classification of failed requests.
    pub async fn post(&self, values: &FormValues, path: &str) -> Result<Vec<u8>> {
        self.execute(Method::POST, values.encode(), path).await
    }

    /// Resolve `path` against the API base.
    ///
    /// The path must start with `/` and the result must stay on the base's
    /// scheme, host and port, so credentials only ever go to the API host.
    fn build_url(&self, path: &str) -> Result<Url> {
        if !path.starts_with('/') {
            return Err(Error::InvalidEndpoint(format!(
                "Twilio path `{path}` must start with `/`"
            )));
        }

        let base = Url::parse(&self.api_base)?;
        let url = Url::parse(&format!("{}{path}", self.api_base))
            .map_err(|err| Error::InvalidEndpoint(format!("Invalid Twilio path `{path}`: {err}")))?;

        if url.origin() != base.origin() || !url.username().is_empty() || url.password().is_some() {
            return Err(Error::InvalidEndpoint(format!(
                "Twilio path `{path}` leaves the API host {}",
                self.api_base
            )));
        }
        Ok(url)
    }

    async fn execute(&self, method: Method, body: String, path: &str) -> Result<Vec<u8>> {
        let url = self.build_url(path)?;
        let http = self.transport.http_client(&self.context)?;

        let mut request = http
            .request(method.clone(), url)
            .basic_auth(self.account_sid(), Some(self.auth_token()));
        if method == Method::POST {
            request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        }
        if let Some(timeout) = self.context.timeout() {
            request = request.timeout(timeout);
        }
        request = request.body(body);

        info!(%method, path, request_id = self.context.request_id(), "Twilio request");

        let mut response = request.send().await?;
        let status = response.status();
        let body = read_body(&mut response).await?;

        debug!(
            %method,
            path,
            status = status.as_u16(),
            bytes = body.len(),
            "Twilio response"
        );

        if status == StatusCode::OK || status == StatusCode::CREATED {
            Ok(body)
        } else {
            Err(Error::from_status(status.as_u16(), body))
        }
    }
}

/// Read the whole body, keeping what was received if the stream fails.
async fn read_body(response: &mut Response) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => return Ok(body),
            Err(err) => {
                return Err(Error::Read {
                    body,
                    message: err.to_string(),
                })
            }
        }
    }
}

#[async_trait]
impl RestClient for TwilioClient {
    fn account_sid(&self) -> &str {
        self.credentials.account_sid()
    }

    fn auth_token(&self) -> &str {
        self.credentials.auth_token()
    }

    fn root_url(&self) -> &str {
        &self.root_url
    }

    async fn get(&self, params: Option<&FormValues>, path: &str) -> Result<Vec<u8>> {
        Self::get(self, params, path).await
    }

    async fn post(&self, values: &FormValues, path: &str) -> Result<Vec<u8>> {
        Self::post(self, values, path).await
    }
}
