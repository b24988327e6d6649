//! Shared test fixtures for API client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::signer::HmacSigner;
use crate::time::FixedClock;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

use super::{Client, ClientConfig};

pub const TOKEN: &str = "sbx:test-token";
pub const SECRET: &str = "api_secret";
pub const NOW: u64 = 1_712_760_187;

/// Mock transport that replays queued results and records requests.
#[derive(Debug, Default)]
pub struct MockClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn responding(status: http::StatusCode, body: &str) -> Arc<Self> {
        Self::new(vec![Ok(HttpResponse::new(status, body))])
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::responding(http::StatusCode::OK, body)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn only_request(&self) -> HttpRequest {
        let requests = self.captured_requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no response queued")
    }
}

pub type TestClient = Client<HmacSigner, Arc<MockClient>, FixedClock>;

/// A client on the default host, pinned to [`NOW`], sending through `mock`.
pub fn client(mock: &Arc<MockClient>) -> TestClient {
    let config = ClientConfig::new()
        .with_http_client(Arc::clone(mock))
        .with_clock(FixedClock::from_unix(NOW));

    Client::new(TOKEN, HmacSigner::new(SECRET), config).unwrap()
}

pub fn header<'a>(req: &'a HttpRequest, name: &str) -> &'a str {
    req.headers
        .get(name)
        .unwrap_or_else(|| panic!("missing header {name}"))
        .to_str()
        .unwrap()
}
