//! Construction-time options for [`Client`](super::Client).

use crate::time::SystemClock;
use crate::transport::ReqwestClient;

/// Default API host.
pub const DEFAULT_HOST: &str = "api.sumsub.com";

/// Options recognized by [`Client::new`](super::Client::new).
///
/// | Option | Default |
/// |---|---|
/// | `host` | [`DEFAULT_HOST`] (always reached over HTTPS) |
/// | `http` | [`ReqwestClient::new`], tuned by [`TransportConfig::default`](crate::transport::TransportConfig::default) (30 s timeouts, env proxy) |
/// | `clock` | [`SystemClock`] |
///
/// # Example
///
/// ```
/// use sumsub_client::api::ClientConfig;
/// use sumsub_client::time::FixedClock;
///
/// let config = ClientConfig::new()
///     .with_host("api.sandbox.example")
///     .with_clock(FixedClock::from_unix(1_712_760_187));
/// assert_eq!(config.host, "api.sandbox.example");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig<H = ReqwestClient, C = SystemClock> {
    /// Host name, optionally with a port.
    pub host: String,
    /// Transport used for every call.
    pub http: H,
    /// Source of the request timestamp.
    pub clock: C,
}

impl ClientConfig {
    /// Creates a configuration with every option at its default.
    #[must_use]
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            http: ReqwestClient::new(),
            clock: SystemClock,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, C> ClientConfig<H, C> {
    /// Overrides the API host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Overrides the transport.
    #[must_use]
    pub fn with_http_client<H2>(self, http: H2) -> ClientConfig<H2, C> {
        ClientConfig {
            host: self.host,
            http,
            clock: self.clock,
        }
    }

    /// Overrides the clock.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> ClientConfig<H, C2> {
        ClientConfig {
            host: self.host,
            http: self.http,
            clock,
        }
    }
}
