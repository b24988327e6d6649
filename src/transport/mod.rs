//! HTTP transport used by the API client.
//!
//! This module provides:
//! - Request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - The transport seam ([`HttpClient`]) that the dispatcher sends through
//! - The production implementation ([`ReqwestClient`]) and its tuning knobs
//!   ([`TransportConfig`])
//!
//! The transport performs exactly one round trip per request. Retries,
//! backoff and deadlines belong to the caller.

mod client;
mod error;
mod http;

#[cfg(test)]
mod client_tests;
#[cfg(test)]
mod http_tests;

pub use client::{ReqwestClient, TransportConfig};
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
