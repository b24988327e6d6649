//! Signed, typed request dispatch.

use http::header::{ACCEPT, CONTENT_TYPE, HeaderName, HeaderValue};
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::{Position, Url};

use crate::signer::{HmacSigner, Signer};
use crate::time::{Clock, SystemClock, unix_seconds};
use crate::transport::{HttpClient, HttpRequest, HttpResponse, ReqwestClient};

use super::{ApiError, ClientConfig, Error};

/// Header carrying the application token.
pub const APP_TOKEN_HEADER: &str = "x-app-token";

/// Header carrying the signed Unix timestamp.
pub const ACCESS_TS_HEADER: &str = "x-app-access-ts";

/// Header carrying the request signature.
pub const ACCESS_SIG_HEADER: &str = "x-app-access-sig";

const JSON: &str = "application/json";

/// Client for the verification API.
///
/// Holds the app token, the [`Signer`], the transport and the clock for its
/// whole lifetime. It has no mutable state, so one instance can serve any
/// number of concurrent calls.
///
/// # Type Parameters
///
/// - `S`: request signer (defaults to [`HmacSigner`])
/// - `H`: transport (defaults to [`ReqwestClient`])
/// - `C`: clock (defaults to [`SystemClock`])
///
/// # Example
///
/// ```no_run
/// use sumsub_client::api::{Client, ClientConfig};
/// use sumsub_client::signer::HmacSigner;
///
/// # async fn example() -> Result<(), sumsub_client::api::Error> {
/// let client = Client::new("app-token", HmacSigner::new("secret"), ClientConfig::new())?;
/// client.health().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client<S = HmacSigner, H = ReqwestClient, C = SystemClock> {
    base: Url,
    token: HeaderValue,
    signer: S,
    http: H,
    clock: C,
}

impl<S, H, C> Client<S, H, C> {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidHost`] if `https://<host>` is not a bare
    /// origin, or [`Error::InvalidToken`] if the token cannot be sent as a
    /// header value.
    pub fn new(app_token: &str, signer: S, config: ClientConfig<H, C>) -> Result<Self, Error> {
        let base = base_url(&config.host)?;

        let mut token =
            HeaderValue::from_str(app_token).map_err(|e| Error::InvalidToken(e.to_string()))?;
        token.set_sensitive(true);

        Ok(Self {
            base,
            token,
            signer,
            http: config.http,
            clock: config.clock,
        })
    }

    /// Returns the origin every request is sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Builds a request URI from unescaped path segments and query pairs.
    ///
    /// Segments are percent-encoded individually, so identifiers containing
    /// `/` or `?` stay inside their segment.
    pub(crate) fn resource_uri(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<String, Error> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidRequest("base URL cannot carry a path".to_string()))?
            .clear()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url[Position::BeforePath..].to_string())
    }
}

impl<S: Signer, H: HttpClient, C: Clock> Client<S, H, C> {
    /// Sends one signed request and decodes the answer.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `uri` - Absolute path plus encoded query string, e.g. `/resources/applicants`
    /// * `body` - Request body; `None` sends no body and signs an empty payload
    ///
    /// The clock is read once; that value is both signed and sent. Exactly one
    /// round trip is made. An empty success body yields `A::default()`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidRequest`] if `uri` is not an absolute path
    /// - [`Error::Encode`] if `body` cannot be serialized
    /// - [`Error::Transport`] if the round trip fails
    /// - [`Error::Api`] for a non-200 status with a structured error body
    /// - [`Error::Status`] for a non-200 status with any other body
    /// - [`Error::InvalidJson`] / [`Error::Decode`] if a 200 body cannot be decoded
    pub async fn call<Q, A>(&self, method: Method, uri: &str, body: Option<&Q>) -> Result<A, Error>
    where
        Q: Serialize + ?Sized,
        A: DeserializeOwned + Default,
    {
        let payload = match body {
            Some(body) => serde_json::to_vec(body).map_err(Error::Encode)?,
            None => Vec::new(),
        };

        let url = self.request_url(uri)?;
        let signed_uri = &url[Position::BeforePath..];

        let timestamp = unix_seconds(self.clock.now());
        let signature = self.signer.sign(timestamp, &method, signed_uri, &payload);
        let signature = HeaderValue::from_str(&signature)
            .map_err(|e| Error::InvalidRequest(format!("signature is not a header value: {e}")))?;

        tracing::debug!(%method, uri = signed_uri, timestamp, "Dispatching API request");

        let mut request = HttpRequest::new(method.clone(), url.clone())
            .with_header(ACCEPT, HeaderValue::from_static(JSON))
            .with_header(CONTENT_TYPE, HeaderValue::from_static(JSON))
            .with_header(HeaderName::from_static(APP_TOKEN_HEADER), self.token.clone())
            .with_header(
                HeaderName::from_static(ACCESS_TS_HEADER),
                HeaderValue::from(timestamp),
            )
            .with_header(HeaderName::from_static(ACCESS_SIG_HEADER), signature);

        if !payload.is_empty() {
            request = request.with_body(payload);
        }

        let response = self.http.request(request).await?;

        tracing::debug!(
            %method,
            uri = &url[Position::BeforePath..],
            status = %response.status,
            "API response received"
        );

        decode_response(&response)
    }

    fn request_url(&self, uri: &str) -> Result<Url, Error> {
        if !uri.starts_with('/') {
            return Err(Error::InvalidRequest(format!(
                "uri must be an absolute path: '{uri}'"
            )));
        }

        let url = self
            .base
            .join(uri)
            .map_err(|e| Error::InvalidRequest(format!("invalid uri '{uri}': {e}")))?;

        // "//other.host/..." would otherwise resolve against a different origin.
        if url.origin() != self.base.origin() {
            return Err(Error::InvalidRequest(format!(
                "uri must not change the host: '{uri}'"
            )));
        }

        Ok(url)
    }
}

/// Turns a fully buffered response into the typed answer or an error.
fn decode_response<A: DeserializeOwned + Default>(response: &HttpResponse) -> Result<A, Error> {
    if response.status != StatusCode::OK {
        return Err(classify_failure(response.status, &response.body));
    }

    if response.body.is_empty() {
        return Ok(A::default());
    }

    let value: serde_json::Value =
        serde_json::from_slice(&response.body).map_err(Error::InvalidJson)?;
    serde_json::from_value(value).map_err(Error::Decode)
}

/// Classifies a non-success response.
///
/// A JSON object body becomes [`Error::Api`]; anything else (empty, HTML,
/// mistyped fields) becomes [`Error::Status`] carrying only the status.
#[must_use]
pub fn classify_failure(status: StatusCode, body: &[u8]) -> Error {
    let parsed = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value::<ApiError>(value).ok(),
        _ => None,
    };

    match parsed {
        Some(api) => {
            tracing::debug!(
                status = status.as_u16(),
                error_code = %api.error_code,
                correlation_id = %api.correlation_id,
                "API returned a structured error"
            );
            Error::Api(api)
        }
        None => Error::Status(status),
    }
}

fn base_url(host: &str) -> Result<Url, Error> {
    let invalid = |reason: String| Error::InvalidHost {
        host: host.to_string(),
        reason,
    };

    if host.is_empty() {
        return Err(invalid("host is empty".to_string()));
    }

    let url = Url::parse(&format!("https://{host}")).map_err(|e| invalid(e.to_string()))?;

    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("host must not contain a path, query or fragment".to_string()));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("host must not contain credentials".to_string()));
    }

    Ok(url)
}
