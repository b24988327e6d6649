//! Tests for the run module.

use std::sync::Mutex;

use http::StatusCode;
use sumsub_client::time::FixedClock;
use sumsub_client::transport::{HttpRequest, HttpResponse};
use sumsub_client::webhook::DigestAlgorithm;

use super::*;

/// Mock HTTP client that answers every request with one canned response.
#[derive(Debug)]
struct MockClient {
    status: StatusCode,
    body: &'static str,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockClient {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpClient for &MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.lock().unwrap().push(req);
        Ok(HttpResponse::new(self.status, self.body))
    }
}

fn client(mock: &MockClient) -> Client<HmacSigner, &MockClient, FixedClock> {
    let config = ClientConfig {
        host: defaults::HOST.to_string(),
        http: mock,
        clock: FixedClock::from_unix(1_712_760_187),
    };
    Client::new("app-token", HmacSigner::new("api_secret"), config).unwrap()
}

mod run_error {
    use super::*;

    #[test]
    fn config_errors_are_config() {
        let missing = RunError::from(ConfigError::missing("app_token", "hint"));
        assert!(missing.is_config());
        assert!(RunError::InvalidMethod("G T".to_string()).is_config());

        let bad_host = RunError::from(api::Error::InvalidToken("bad".to_string()));
        assert!(bad_host.is_config());
    }

    #[test]
    fn service_and_payload_errors_are_runtime() {
        assert!(!RunError::from(api::Error::Status(StatusCode::BAD_GATEWAY)).is_config());
        assert!(!RunError::from(VerifyError::DigestMismatch).is_config());
        assert!(!RunError::Transport(HttpError::Timeout).is_config());
    }

    #[test]
    fn api_error_stays_reachable_through_run_error() {
        let inner = api::classify_failure(StatusCode::BAD_REQUEST, br#"{"errorCode":1004}"#);
        let error = RunError::from(inner);

        let api = api::as_api_error(&error).unwrap();
        assert_eq!(api.error_code, api::ErrorCode::CorruptedFile);
    }

    #[test]
    fn verify_error_message_is_kept() {
        let error = RunError::from(VerifyError::DigestMismatch);
        assert_eq!(error.to_string(), "Webhook verification failed: digest mismatch");
    }
}

mod sign {
    use super::*;

    const BODY: &str = r#"{"userId":"1000","levelName":"default","ttl":60}"#;

    #[test]
    fn matches_known_signature() {
        let output = sign_request(
            &HmacSigner::new("api_secret"),
            &FixedClock::from_unix(0),
            "post",
            "/resources/accessTokens",
            Some(BODY),
            Some(1_712_760_187),
        )
        .unwrap();

        assert_eq!(output["method"], "POST");
        assert_eq!(output["timestamp"], 1_712_760_187);
        assert_eq!(
            output["signature"],
            "260c8893fb0317e8a714ce3bce9c16821649f1e27a49bd7d926fcf23942628c0"
        );
    }

    #[test]
    fn timestamp_defaults_to_clock() {
        let output = sign_request(
            &HmacSigner::new("api_secret"),
            &FixedClock::from_unix(1_700_000_000),
            "GET",
            "/resources/status/api",
            None,
            None,
        )
        .unwrap();

        assert_eq!(output["timestamp"], 1_700_000_000);
    }

    #[test]
    fn invalid_method_is_rejected() {
        let result = sign_request(
            &HmacSigner::new("api_secret"),
            &FixedClock::from_unix(0),
            "GE T",
            "/",
            None,
            None,
        );

        assert!(matches!(result, Err(RunError::InvalidMethod(m)) if m == "GE T"));
    }
}

mod verify_webhook {
    use super::*;

    const PAYLOAD: &[u8] = br#"{"type":"applicantReviewed"}"#;

    #[test]
    fn valid_digest_reports_success() {
        let digest = DigestAlgorithm::HmacSha256Hex.digest_hex(b"whsec", PAYLOAD);
        let output = verify_payload("whsec", "HMAC_SHA256_HEX", &digest, PAYLOAD).unwrap();

        assert_eq!(output["valid"], true);
        assert_eq!(output["algorithm"], "HMAC_SHA256_HEX");
    }

    #[test]
    fn wrong_secret_is_mismatch() {
        let digest = DigestAlgorithm::HmacSha1Hex.digest_hex(b"whsec", PAYLOAD);
        let result = verify_payload("other", "HMAC_SHA1_HEX", &digest, PAYLOAD);

        assert!(matches!(result, Err(RunError::Verify(VerifyError::DigestMismatch))));
    }

    #[test]
    fn payload_is_read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, PAYLOAD).unwrap();

        assert_eq!(read_payload(&path).unwrap(), PAYLOAD);
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_payload(&dir.path().join("absent.json"));

        assert!(matches!(result, Err(RunError::PayloadRead { .. })));
    }
}

mod api_commands {
    use super::*;

    #[tokio::test]
    async fn health_prints_ok() {
        let mock = MockClient::new(StatusCode::OK, r#"{"ok":1}"#);
        let output = call_api(&client(&mock), ApiCommand::Health).await.unwrap();

        assert_eq!(output, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn access_token_uses_default_ttl() {
        let mock = MockClient::new(StatusCode::OK, r#"{"token":"t","userId":"user-42"}"#);
        let command = ApiCommand::AccessToken {
            user_id: "user-42".to_string(),
            level_name: "basic".to_string(),
            ttl: None,
        };

        let output = call_api(&client(&mock), command).await.unwrap();
        assert_eq!(output["token"], "t");

        let sent = mock.captured_requests();
        let body: Value = serde_json::from_slice(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["ttlInSecs"], defaults::ACCESS_TOKEN_TTL_SECS);
    }

    #[tokio::test]
    async fn websdk_link_uses_default_lang_and_ttl() {
        let mock = MockClient::new(StatusCode::OK, r#"{"url":"https://in.sumsub.com/x"}"#);
        let command = ApiCommand::WebsdkLink {
            level_name: "basic".to_string(),
            user_id: "user-42".to_string(),
            ttl: None,
            lang: None,
        };

        call_api(&client(&mock), command).await.unwrap();

        let query = mock.captured_requests()[0].url.query().unwrap_or_default().to_string();
        assert_eq!(query, "externalUserId=user-42&lang=en&ttlInSecs=1800");
    }

    #[tokio::test]
    async fn applicant_prefers_id() {
        let mock = MockClient::new(StatusCode::OK, r#"{"id":"app-1"}"#);
        let command = ApiCommand::Applicant {
            id: Some("app-1".to_string()),
            external_user_id: None,
        };

        let output = call_api(&client(&mock), command).await.unwrap();

        assert_eq!(output["id"], "app-1");
        assert_eq!(mock.captured_requests()[0].url.path(), "/resources/applicants/app-1/one");
    }

    #[tokio::test]
    async fn service_error_is_surfaced() {
        let mock = MockClient::new(
            StatusCode::UNAUTHORIZED,
            r#"{"code":401,"errorCode":4003,"description":"Signature mismatch"}"#,
        );
        let err = call_api(&client(&mock), ApiCommand::ReviewStatus {
            applicant_id: "x".to_string(),
        })
        .await
        .unwrap_err();

        assert!(!err.is_config());
        assert_eq!(
            api::as_api_error(&err).map(|e| e.error_code),
            Some(api::ErrorCode::AppTokenSignatureMismatch)
        );
    }
}

mod init {
    use super::*;

    #[test]
    fn writes_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sumsub.toml");

        let written = init_config(Some(&path), false).unwrap();

        assert_eq!(written, path);
        assert!(path.is_file());
    }

    #[test]
    fn second_write_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sumsub.toml");
        init_config(Some(&path), false).unwrap();

        assert!(matches!(
            init_config(Some(&path), false),
            Err(ConfigError::FileExists(_))
        ));
        assert!(init_config(Some(&path), true).is_ok());
    }
}
