//! HTTP transport implementation.
//!
//! reqwest-backed transport with connection pooling and finite timeouts.

use std::sync::LazyLock;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use super::config::HttpConfig;
use crate::{
    error::{GatewayError, Result},
    transport::{ApiRequest, AuthScheme, Body, Method, RawResponse, Transport, sealed},
};

/// Default HTTP client with connection pooling enabled.
///
/// Using a singleton avoids recreating the client per transport instance,
/// preserving connection pooling benefits across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let config = HttpConfig::default();
    Client::builder()
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .user_agent(config.user_agent)
        .build()
        .expect("Failed to create default HTTP client")
});

/// reqwest-backed transport.
///
/// Requests are joined onto the environment base URL, credentials are
/// attached per [`AuthScheme`], and the raw body is returned regardless of
/// status so the decode layer can surface structured remote errors.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
}

impl sealed::private::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport with default settings, sharing the singleton
    /// pooled client.
    ///
    /// Defaults: 30 s total timeout, 10 s connect timeout, 10 idle
    /// connections per host, `paypal-orders/<version>` User-Agent.
    ///
    /// # Errors
    ///
    /// This method is infallible but returns `Result` for API consistency
    /// with [`with_config`](Self::with_config).
    pub fn new() -> Result<Self> {
        Ok(Self { client: DEFAULT_HTTP_CLIENT.clone() })
    }

    /// Creates a transport with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is out of bounds or the HTTP
    /// client cannot be built.
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(GatewayError::Http)?;
        Ok(Self { client })
    }

    fn resolve_url(base_url: &str, path: &str) -> Result<Url> {
        let base = Url::parse(base_url)
            .map_err(|e| GatewayError::Transport(format!("invalid base URL '{base_url}': {e}")))?;
        if base.scheme() != "https" {
            return Err(GatewayError::Transport(format!(
                "base URL must use HTTPS, got: {}",
                base.scheme()
            )));
        }
        base.join(path)
            .map_err(|e| GatewayError::Transport(format!("invalid request path '{path}': {e}")))
    }
}

impl Transport for HttpTransport {
    #[instrument(
        skip(self, request),
        fields(method = %request.method, path = request.path)
    )]
    async fn send<'a>(&'a self, request: ApiRequest<'a>) -> Result<RawResponse> {
        let url = Self::resolve_url(request.base_url, request.path)?;

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Patch => self.client.patch(url),
        };

        builder = match request.auth {
            AuthScheme::None => builder,
            AuthScheme::Basic { username, password } => builder.basic_auth(username, Some(password)),
            AuthScheme::Bearer(token) => builder.bearer_auth(token),
        };

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        builder = match request.body {
            Some(Body::Json(value)) => builder.json(value),
            Some(Body::Form(fields)) => builder.form(&fields),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, body_len = body.len(), "received response");

        Ok(RawResponse { status, body })
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
