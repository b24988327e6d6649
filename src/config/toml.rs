//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// API credentials and host
    #[serde(default)]
    pub api: ApiSection,

    /// HTTP transport tuning
    #[serde(default)]
    pub transport: TransportSection,

    /// Webhook verification
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// API configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiSection {
    /// API host, without scheme
    pub host: Option<String>,

    /// Application token
    pub app_token: Option<String>,

    /// Secret key used to sign requests
    pub secret_key: Option<String>,
}

/// Transport configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransportSection {
    /// Overall request timeout in seconds
    pub timeout: Option<u64>,

    /// Connect timeout in seconds
    pub connect_timeout: Option<u64>,

    /// TCP keep-alive interval in seconds
    pub tcp_keepalive: Option<u64>,

    /// Use proxies configured through the environment
    pub use_env_proxy: Option<bool>,
}

/// Webhook configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WebhookSection {
    /// Secret key used to verify payload digests
    pub secret_key: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# sumsub configuration file
#
# Values given on the command line or through the environment
# (SUMSUB_APP_TOKEN, SUMSUB_SECRET_KEY, SUMSUB_WEBHOOK_SECRET)
# take precedence over this file.

[api]
# API host, without scheme (default: api.sumsub.com)
# host = "api.sumsub.com"

# Application token (required for API commands)
# app_token = "sbx:..."

# Secret key used to sign requests (required for API commands and `sign`)
# secret_key = "..."

[transport]
# Overall request timeout in seconds (default: 30)
# timeout = 30

# Connect timeout in seconds (default: 30)
# connect_timeout = 30

# TCP keep-alive interval in seconds (default: 30)
# tcp_keepalive = 30

# Use HTTPS_PROXY / ALL_PROXY from the environment (default: true)
# use_env_proxy = true

[webhook]
# Secret key used to verify X-Payload-Digest (required for `verify-webhook`)
# secret_key = "..."
"#
    .to_string()
}
