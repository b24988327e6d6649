//! Configuration layer for the `sumsub` binary.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values passed on the command line, or through
//!    `SUMSUB_APP_TOKEN`, `SUMSUB_SECRET_KEY` and `SUMSUB_WEBHOOK_SECRET`
//! 2. **TOML config file** - `--config`, else `<config_dir>/sumsub/config.toml` if present
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! # Credentials
//!
//! Credentials are optional at load time. Each command asks for the ones it
//! uses ([`ValidatedConfig::api_credentials`], [`ValidatedConfig::signing_key`],
//! [`ValidatedConfig::webhook_secret`]), so `sign` works without an app token
//! and `verify-webhook` without API credentials.
//!
//! # Boolean Flag Semantics
//!
//! `--no-proxy` only disables: when absent, `transport.use_env_proxy` (default
//! true) decides.
//!
//! # TOML-Only Options
//!
//! `transport.connect_timeout` and `transport.tcp_keepalive` (both 30s by
//! default) have no CLI flag.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{ApiCommand, Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{
    Secret, ValidatedConfig, default_config_path, init_path, write_default_config,
};
