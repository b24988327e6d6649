//! sumsub-client: client for the Sumsub identity verification API
//!
//! A library for sending signed, typed requests to the verification API,
//! classifying its structured errors, and verifying webhook payload digests.

pub mod api;
pub mod config;
pub mod signer;
pub mod time;
pub mod transport;
pub mod webhook;
