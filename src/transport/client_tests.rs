//! Tests for `ReqwestClient` and `TransportConfig`.
//!
//! Real round trips go only to an unresolvable host or to a local listener
//! that accepts connections and never answers; the dispatcher tests cover
//! request/response handling through mock clients.

use std::net::TcpListener;
use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, ReqwestClient, TransportConfig};

/// Binds a listener that completes TCP handshakes but never replies.
fn silent_server() -> (TcpListener, url::Url) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = url::Url::parse(&format!("http://{}/", listener.local_addr().unwrap())).unwrap();
    (listener, url)
}

mod transport_config {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = TransportConfig::default();

        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.tcp_keepalive, Duration::from_secs(30));
        assert!(config.use_env_proxy);
        assert_eq!(config, TransportConfig::new());
    }

    #[test]
    fn builder_overrides_each_field() {
        let config = TransportConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_connect_timeout(Duration::from_secs(2))
            .with_tcp_keepalive(Duration::from_secs(90))
            .with_env_proxy(false);

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.tcp_keepalive, Duration::from_secs(90));
        assert!(!config.use_env_proxy);
    }
}

mod reqwest_client {
    use super::*;

    #[test]
    fn new_applies_default_transport_config() {
        let client = ReqwestClient::new();
        assert_eq!(client.config(), Some(&TransportConfig::default()));
    }

    #[test]
    fn with_config_remembers_tuning() {
        let config = TransportConfig::new()
            .with_timeout(Duration::from_secs(3))
            .with_env_proxy(false);
        let client = ReqwestClient::with_config(&config).unwrap();

        assert_eq!(client.config(), Some(&config));
    }

    #[test]
    fn from_client_has_no_tuning_of_its_own() {
        let custom = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        let client = ReqwestClient::from_client(custom);

        assert!(client.config().is_none());
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::new();
        let url = url::Url::parse("http://invalid.invalid.invalid/").unwrap();
        let req = HttpRequest::new(::http::Method::GET, url);

        let result = client.request(req).await;

        // Behind a proxy the failure may come back as a 502 instead.
        match result {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(resp) if !resp.status.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}

mod timeouts {
    use super::*;

    #[tokio::test]
    async fn silent_server_hits_configured_timeout() {
        let (_listener, url) = silent_server();
        let config = TransportConfig::new()
            .with_timeout(Duration::from_millis(300))
            .with_env_proxy(false);
        let client = ReqwestClient::with_config(&config).unwrap();

        let result = tokio::time::timeout(
            Duration::from_secs(10),
            client.request(HttpRequest::new(::http::Method::GET, url)),
        )
        .await
        .expect("transport timeout should fire first");

        assert!(matches!(result, Err(HttpError::Timeout)), "got {result:?}");
    }

    #[tokio::test]
    async fn default_client_gives_up_on_silent_server() {
        let (_listener, url) = silent_server();
        let client = ReqwestClient::new();

        let result = tokio::time::timeout(
            TransportConfig::DEFAULT_TIMEOUT + Duration::from_secs(5),
            client.request(HttpRequest::new(::http::Method::GET, url)),
        )
        .await
        .expect("default transport must not wait forever");

        // A proxy from the environment may answer with an error status first.
        match result {
            Err(HttpError::Timeout) => {}
            Ok(resp) if !resp.status.is_success() => {}
            other => panic!("Expected a timeout, got {other:?}"),
        }
    }
}
