//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

pub use crate::api::DEFAULT_HOST as HOST;

/// Default overall request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Default connect timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default TCP keep-alive interval in seconds.
pub const TCP_KEEPALIVE_SECS: u64 = 30;

/// Default lifetime of an SDK access token in seconds.
pub const ACCESS_TOKEN_TTL_SECS: u64 = 600;

/// Default lifetime of a WebSDK link in seconds.
pub const WEBSDK_LINK_TTL_SECS: u64 = 1800;

/// Default WebSDK interface language.
pub const LANG: &str = "en";

/// Config directory name under the platform config dir.
pub const APP_DIR: &str = "sumsub";

/// Config file name inside [`APP_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Default access token lifetime as Duration.
#[must_use]
pub const fn access_token_ttl() -> Duration {
    Duration::from_secs(ACCESS_TOKEN_TTL_SECS)
}

/// Default WebSDK link lifetime as Duration.
#[must_use]
pub const fn websdk_link_ttl() -> Duration {
    Duration::from_secs(WEBSDK_LINK_TTL_SECS)
}
