//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Connection tuning for [`ReqwestClient`].
///
/// # Defaults
///
/// - `timeout`: 30 seconds for the whole round trip
/// - `connect_timeout`: 30 seconds
/// - `tcp_keepalive`: 30 seconds
/// - `use_env_proxy`: true (`HTTPS_PROXY`, `ALL_PROXY`, ... are honoured)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Overall request timeout, including reading the body.
    pub timeout: Duration,
    /// Timeout for establishing the connection (TCP and TLS).
    pub connect_timeout: Duration,
    /// TCP keep-alive interval for pooled connections.
    pub tcp_keepalive: Duration,
    /// Whether proxies configured through the environment are used.
    pub use_env_proxy: bool,
}

impl TransportConfig {
    /// Default overall timeout (30 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connect timeout (30 seconds).
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default TCP keep-alive (30 seconds).
    pub const DEFAULT_TCP_KEEPALIVE: Duration = Duration::from_secs(30);

    /// Creates a configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
            tcp_keepalive: Self::DEFAULT_TCP_KEEPALIVE,
            use_env_proxy: true,
        }
    }

    /// Sets the overall request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the TCP keep-alive interval.
    #[must_use]
    pub const fn with_tcp_keepalive(mut self, interval: Duration) -> Self {
        self.tcp_keepalive = interval;
        self
    }

    /// Enables or disables proxies taken from the environment.
    #[must_use]
    pub const fn with_env_proxy(mut self, enabled: bool) -> Self {
        self.use_env_proxy = enabled;
        self
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` implementing [`HttpClient`].
/// Cloning is cheap and shares the connection pool.
///
/// # Example
///
/// ```no_run
/// use sumsub_client::transport::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://api.sumsub.com/resources/status/api")?;
/// let response = client.request(HttpRequest::new(http::Method::GET, url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    config: Option<TransportConfig>,
}

impl ReqwestClient {
    /// Creates an HTTP client with [`TransportConfig::default`] tuning.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend or resolver cannot be initialised, exactly
    /// when `reqwest::Client::new` would. Use [`with_config`](Self::with_config)
    /// to get that failure as an error instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&TransportConfig::new())
            .expect("reqwest client with default transport settings")
    }

    /// Creates an HTTP client tuned by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend or resolver cannot be
    /// initialised.
    pub fn with_config(config: &TransportConfig) -> Result<Self, HttpError> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(config.tcp_keepalive);

        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        let inner = builder.build().map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            config: Some(config.clone()),
        })
    }

    /// Creates an HTTP client from an existing reqwest client.
    ///
    /// The caller's client keeps its own timeouts; none are added.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self {
            inner: client,
            config: None,
        }
    }

    /// Tuning this client was built with, or `None` for [`from_client`](Self::from_client).
    #[must_use]
    pub const fn config(&self) -> Option<&TransportConfig> {
        self.config.as_ref()
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(map_send_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(map_send_error)?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }
}

fn map_send_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
