//! Request signing for outbound API calls.
//!
//! Every request carries `X-App-Access-Sig`, a lowercase hex HMAC-SHA256 over
//! the canonical string `<unix seconds><METHOD><uri><body>`, concatenated
//! without separators. An empty body contributes nothing to the string.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the `X-App-Access-Sig` value for a request.
///
/// Implementations must be pure: the same inputs always give the same
/// signature, no matter how many callers sign concurrently.
pub trait Signer: Send + Sync {
    /// Signs a request.
    ///
    /// # Arguments
    ///
    /// * `timestamp` - Seconds since the Unix epoch, as sent in `X-App-Access-Ts`
    /// * `method` - HTTP method
    /// * `uri` - Path plus encoded query string, exactly as sent
    /// * `payload` - Raw request body, empty if there is none
    fn sign(&self, timestamp: i64, method: &http::Method, uri: &str, payload: &[u8]) -> String;
}

/// HMAC-SHA256 signer keyed with the application secret.
///
/// A fresh MAC is derived for each call, so the signer holds no mutable state
/// and needs no lock.
///
/// # Example
///
/// ```
/// use sumsub_client::signer::{HmacSigner, Signer};
///
/// let signer = HmacSigner::new("api_secret");
/// let sig = signer.sign(
///     1_712_760_187,
///     &http::Method::POST,
///     "/resources/accessTokens",
///     br#"{"userId":"1000","levelName":"default","ttl":60}"#,
/// );
/// assert_eq!(sig, "260c8893fb0317e8a714ce3bce9c16821649f1e27a49bd7d926fcf23942628c0");
/// ```
#[derive(Clone)]
pub struct HmacSigner {
    key: Vec<u8>,
}

impl HmacSigner {
    /// Creates a signer from the application secret key.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self { key: secret.into() }
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("key", &"<redacted>")
            .finish()
    }
}

impl Signer for HmacSigner {
    fn sign(&self, timestamp: i64, method: &http::Method, uri: &str, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(&canonical_string(timestamp, method, uri, payload));
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Builds the byte string that gets signed.
#[must_use]
pub fn canonical_string(timestamp: i64, method: &http::Method, uri: &str, payload: &[u8]) -> Vec<u8> {
    let timestamp = timestamp.to_string();
    let method = method.as_str();

    let mut out = Vec::with_capacity(timestamp.len() + method.len() + uri.len() + payload.len());
    out.extend_from_slice(timestamp.as_bytes());
    out.extend_from_slice(method.as_bytes());
    out.extend_from_slice(uri.as_bytes());
    out.extend_from_slice(payload);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const SECRET: &str = "api_secret";
    const URI: &str = "/resources/accessTokens";
    const BODY: &[u8] = br#"{"userId":"1000","levelName":"default","ttl":60}"#;
    const EXPECTED: &str = "260c8893fb0317e8a714ce3bce9c16821649f1e27a49bd7d926fcf23942628c0";

    #[test]
    fn known_vector_is_reproduced() {
        let signer = HmacSigner::new(SECRET);
        let sig = signer.sign(1_712_760_187, &http::Method::POST, URI, BODY);

        assert_eq!(sig, EXPECTED);
    }

    #[test]
    fn signature_is_lowercase_hex_of_sha256_length() {
        let sig = HmacSigner::new(SECRET).sign(0, &http::Method::GET, "/", b"");

        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn canonical_string_concatenates_without_separators() {
        let s = canonical_string(1_712_760_187, &http::Method::GET, "/a?b=c", b"{}");
        assert_eq!(s, b"1712760187GET/a?b=c{}");
    }

    #[test]
    fn empty_payload_contributes_nothing() {
        let s = canonical_string(10, &http::Method::GET, "/resources/status/api", b"");
        assert_eq!(s, b"10GET/resources/status/api");
    }

    #[test]
    fn each_input_changes_the_signature() {
        let signer = HmacSigner::new(SECRET);
        let base = signer.sign(1_712_760_187, &http::Method::POST, URI, BODY);

        assert_ne!(base, signer.sign(1_712_760_188, &http::Method::POST, URI, BODY));
        assert_ne!(base, signer.sign(1_712_760_187, &http::Method::PUT, URI, BODY));
        assert_ne!(base, signer.sign(1_712_760_187, &http::Method::POST, "/resources", BODY));
        assert_ne!(base, signer.sign(1_712_760_187, &http::Method::POST, URI, b"{}"));
        assert_ne!(
            base,
            HmacSigner::new("other_secret").sign(1_712_760_187, &http::Method::POST, URI, BODY)
        );
    }

    #[test]
    fn concurrent_signing_is_deterministic() {
        let signer = Arc::new(HmacSigner::new(SECRET));

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    let signer = Arc::clone(&signer);
                    scope.spawn(move || {
                        (0..200)
                            .map(|_| signer.sign(1_712_760_187, &http::Method::POST, URI, BODY))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                for sig in handle.join().unwrap() {
                    assert_eq!(sig, EXPECTED);
                }
            }
        });
    }

    #[test]
    fn debug_output_redacts_key() {
        let debug = format!("{:?}", HmacSigner::new(SECRET));

        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(SECRET));
    }
}
