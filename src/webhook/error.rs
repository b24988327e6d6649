//! Webhook verification failures.

use thiserror::Error;

/// Reason a webhook failed verification.
///
/// The variants are disjoint; exactly one is reported per verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The digest header was missing or empty.
    #[error("empty digest")]
    EmptyDigest,

    /// No secret key was configured.
    #[error("empty secret key")]
    EmptySecretKey,

    /// The algorithm tag is not one of the supported values.
    #[error("unsupported algo: {0}")]
    UnsupportedAlgorithm(String),

    /// The digest is not valid hex.
    #[error("malformed digest")]
    MalformedDigest,

    /// The digest does not match the payload.
    #[error("digest mismatch")]
    DigestMismatch,
}
