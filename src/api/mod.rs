//! Typed, signed access to the verification API.
//!
//! This module provides:
//! - The client and its generic dispatcher ([`Client`], [`Client::call`])
//! - Construction options ([`ClientConfig`])
//! - The error taxonomy ([`Error`]) and the service's structured errors
//!   ([`ApiError`], [`ErrorCode`])
//! - Typed endpoint wrappers and their shapes ([`models`])
//!
//! # Flow
//!
//! Each call serializes the body, reads the clock once, signs
//! `<ts><METHOD><uri><body>` and sends the request with the
//! `X-App-Token`, `X-App-Access-Ts` and `X-App-Access-Sig` headers. A 200
//! response is decoded into the answer type; anything else is classified by
//! [`classify_failure`].

mod client;
mod config;
mod endpoints;
mod error;
pub mod models;

#[cfg(test)]
mod test_fixtures;

pub use client::{
    ACCESS_SIG_HEADER, ACCESS_TS_HEADER, APP_TOKEN_HEADER, Client, classify_failure,
};
pub use config::{ClientConfig, DEFAULT_HOST};
pub use error::{ApiError, Error, ErrorCode, as_api_error};
