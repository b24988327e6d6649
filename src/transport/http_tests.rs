//! Tests for HTTP request/response types.

use super::{HttpRequest, HttpResponse};

fn url() -> url::Url {
    url::Url::parse("https://api.sumsub.com/resources/applicants").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn new_creates_request_with_method_and_url() {
        let req = HttpRequest::new(http::Method::PUT, url());

        assert_eq!(req.method, http::Method::PUT);
        assert_eq!(req.url, url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn with_body_sets_body() {
        let body = br#"{"externalUserId":"u-1"}"#.to_vec();
        let req = HttpRequest::new(http::Method::POST, url()).with_body(body.clone());

        assert_eq!(req.body, Some(body));
    }

    #[test]
    fn with_header_replaces_existing_value() {
        let req = HttpRequest::new(http::Method::GET, url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 1);
        assert_eq!(
            req.headers.get(http::header::ACCEPT).unwrap(),
            "application/json"
        );
    }
}

mod http_response {
    use super::*;

    #[test]
    fn new_keeps_status_and_whole_body() {
        let resp = HttpResponse::new(http::StatusCode::BAD_REQUEST, r#"{"errorCode":1004}"#);

        assert_eq!(resp.status, http::StatusCode::BAD_REQUEST);
        assert_eq!(resp.body, br#"{"errorCode":1004}"#);
    }

    #[test]
    fn empty_body_stays_empty() {
        let resp = HttpResponse::new(http::StatusCode::OK, Vec::new());
        assert!(resp.body.is_empty());
    }
}
