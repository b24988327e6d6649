//! Verification of inbound webhook notifications.
//!
//! The service signs each webhook body with a keyed digest and sends it in
//! two headers:
//! - `X-Payload-Digest-Alg`: one of `HMAC_SHA1_HEX`, `HMAC_SHA256_HEX`, `HMAC_SHA512_HEX`
//! - `X-Payload-Digest`: the hex-encoded digest
//!
//! Verification is independent of the API client and holds no state.
//!
//! # Request bodies
//!
//! [`verify_request`] borrows an already buffered body. Integrations that
//! receive a streaming body must collect it first and hand the same bytes
//! to whatever processes the webhook afterwards.

mod digest;
mod error;


pub use digest::{
    DIGEST_ALGORITHM_HEADER, DIGEST_HEADER, DigestAlgorithm, verify_digest, verify_parts,
    verify_request,
};
pub use error::VerifyError;
