//! Wire-level request and response values and the [`HttpClient`] seam.

use super::HttpError;

/// One outbound API request, already signed.
///
/// The dispatcher fills in the authentication headers before handing the
/// request to a transport; transports send it as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method
    pub method: http::Method,
    /// Absolute URL, path and query exactly as signed
    pub url: url::Url,
    /// Headers, at most one value per name
    pub headers: http::HeaderMap,
    /// Serialized body; `None` sends no body at all
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Starts a request with no headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Attaches the serialized body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets `name`, dropping any value it already had.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Status and complete body of an answer.
///
/// Transports return only after the body has been read to the end, so the
/// dispatcher never looks at a status without its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status line code
    pub status: http::StatusCode,
    /// Entire body; empty when the service sent none
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Pairs a status with its buffered body.
    #[must_use]
    pub fn new(status: http::StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends signed requests for [`Client`](crate::api::Client).
///
/// An implementation performs one round trip per call and never retries.
/// Non-success statuses are returned as responses, never as errors;
/// classifying them is the dispatcher's job.
///
/// Tests swap in an implementation that replays canned responses and
/// records what it was sent.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the whole answer.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Connection`] if the connection or TLS setup fails
    /// - [`HttpError::Timeout`] if the configured timeout elapses
    /// - [`HttpError::InvalidUrl`] if the transport rejects the URL
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
