//! Keyed payload digests and their verification.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use super::VerifyError;

/// Header carrying the digest algorithm tag.
pub const DIGEST_ALGORITHM_HEADER: &str = "x-payload-digest-alg";

/// Header carrying the hex-encoded digest.
pub const DIGEST_HEADER: &str = "x-payload-digest";

/// Keyed hash used to sign a webhook body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    /// `HMAC_SHA1_HEX`
    HmacSha1Hex,
    /// `HMAC_SHA256_HEX`
    HmacSha256Hex,
    /// `HMAC_SHA512_HEX`
    HmacSha512Hex,
}

impl DigestAlgorithm {
    /// All supported algorithms.
    pub const ALL: [Self; 3] = [Self::HmacSha1Hex, Self::HmacSha256Hex, Self::HmacSha512Hex];

    /// The tag sent in `X-Payload-Digest-Alg`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HmacSha1Hex => "HMAC_SHA1_HEX",
            Self::HmacSha256Hex => "HMAC_SHA256_HEX",
            Self::HmacSha512Hex => "HMAC_SHA512_HEX",
        }
    }

    /// Computes the raw digest of `payload` keyed with `secret`.
    #[must_use]
    pub fn digest(self, secret: &[u8], payload: &[u8]) -> Vec<u8> {
        match self {
            Self::HmacSha1Hex => finalize(keyed::<Hmac<Sha1>>(secret, payload)),
            Self::HmacSha256Hex => finalize(keyed::<Hmac<Sha256>>(secret, payload)),
            Self::HmacSha512Hex => finalize(keyed::<Hmac<Sha512>>(secret, payload)),
        }
    }

    /// Computes the digest as the service sends it: lowercase hex.
    #[must_use]
    pub fn digest_hex(self, secret: &[u8], payload: &[u8]) -> String {
        hex::encode(self.digest(secret, payload))
    }

    /// Compares `expected` against the digest of `payload` in constant time.
    #[must_use]
    pub fn verify(self, secret: &[u8], payload: &[u8], expected: &[u8]) -> bool {
        match self {
            Self::HmacSha1Hex => keyed::<Hmac<Sha1>>(secret, payload)
                .verify_slice(expected)
                .is_ok(),
            Self::HmacSha256Hex => keyed::<Hmac<Sha256>>(secret, payload)
                .verify_slice(expected)
                .is_ok(),
            Self::HmacSha512Hex => keyed::<Hmac<Sha512>>(secret, payload)
                .verify_slice(expected)
                .is_ok(),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algo| algo.as_str() == s)
            .ok_or_else(|| VerifyError::UnsupportedAlgorithm(s.to_string()))
    }
}

fn keyed<M: Mac + KeyInit>(secret: &[u8], payload: &[u8]) -> M {
    let mut mac = <M as KeyInit>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(payload);
    mac
}

fn finalize<M: Mac>(mac: M) -> Vec<u8> {
    mac.finalize().into_bytes().to_vec()
}

/// Verifies a webhook payload against its digest.
///
/// Checks run in a fixed order and stop at the first failure: empty digest,
/// empty secret, unknown algorithm, undecodable hex, then the digest itself.
///
/// # Errors
///
/// Returns the [`VerifyError`] describing the first failed check.
///
/// # Example
///
/// ```
/// use sumsub_client::webhook::{DigestAlgorithm, verify_digest};
///
/// let digest = DigestAlgorithm::HmacSha256Hex.digest_hex(b"secret", b"payload");
/// assert!(verify_digest(b"payload", b"secret", "HMAC_SHA256_HEX", &digest).is_ok());
/// ```
pub fn verify_digest(
    payload: &[u8],
    secret_key: &[u8],
    algorithm: &str,
    digest_hex: &str,
) -> Result<(), VerifyError> {
    check_digest(payload, secret_key, algorithm, digest_hex)
        .inspect_err(|e| tracing::debug!(algorithm, reason = %e, "Webhook digest rejected"))
}

fn check_digest(
    payload: &[u8],
    secret_key: &[u8],
    algorithm: &str,
    digest_hex: &str,
) -> Result<(), VerifyError> {
    if digest_hex.is_empty() {
        return Err(VerifyError::EmptyDigest);
    }
    if secret_key.is_empty() {
        return Err(VerifyError::EmptySecretKey);
    }

    let algorithm: DigestAlgorithm = algorithm.parse()?;
    let expected = hex::decode(digest_hex).map_err(|_| VerifyError::MalformedDigest)?;

    if algorithm.verify(secret_key, payload, &expected) {
        Ok(())
    } else {
        Err(VerifyError::DigestMismatch)
    }
}

/// Verifies a webhook given its headers and raw body.
///
/// A missing header is treated as an empty value.
///
/// # Errors
///
/// See [`verify_digest`].
pub fn verify_parts(
    headers: &http::HeaderMap,
    body: &[u8],
    secret_key: &[u8],
) -> Result<(), VerifyError> {
    let algorithm = header_text(headers, DIGEST_ALGORITHM_HEADER);
    let digest = header_text(headers, DIGEST_HEADER);

    verify_digest(body, secret_key, &algorithm, &digest)
}

/// Verifies an inbound webhook request.
///
/// The body must already be buffered; it is borrowed, not consumed, so the
/// same request can be processed afterwards.
///
/// # Errors
///
/// See [`verify_digest`].
pub fn verify_request<B: AsRef<[u8]>>(
    request: &http::Request<B>,
    secret_key: &[u8],
) -> Result<(), VerifyError> {
    verify_parts(request.headers(), request.body().as_ref(), secret_key)
}

fn header_text<'a>(headers: &'a http::HeaderMap, name: &str) -> Cow<'a, str> {
    headers
        .get(name)
        .map_or(Cow::Borrowed(""), |v| String::from_utf8_lossy(v.as_bytes()))
}
