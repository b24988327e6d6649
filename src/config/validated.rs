//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction;
//! credentials are only required by the commands that use them.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::transport::TransportConfig;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// A credential whose value never shows up in `Debug` or `Display` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps a value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config,
/// or [`ValidatedConfig::load`] to also locate and read the config file.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// API host, without scheme
    pub host: String,

    /// Application token, if configured
    pub app_token: Option<Secret>,

    /// Request signing key, if configured
    pub secret_key: Option<Secret>,

    /// Webhook digest key, if configured
    pub webhook_secret: Option<Secret>,

    /// HTTP transport tuning
    pub transport: TransportConfig,

    /// Config file the values were read from, if any
    pub config_file: Option<PathBuf>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = |s: &Option<Secret>| if s.is_some() { "set" } else { "unset" };
        let file = self
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ host: {}, app_token: {}, secret_key: {}, webhook_secret: {}, \
             timeout: {}s, connect_timeout: {}s, env_proxy: {}, file: {} }}",
            self.host,
            set(&self.app_token),
            set(&self.secret_key),
            set(&self.webhook_secret),
            self.transport.timeout.as_secs(),
            self.transport.connect_timeout.as_secs(),
            self.transport.use_env_proxy,
            file,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments (and their environment variables) take precedence over
    /// TOML config values. Empty credentials count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The host is empty or carries a scheme
    /// - A duration is zero
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let host = Self::resolve_host(cli, toml)?;

        let app_token = resolve_secret(
            cli.app_token.as_deref(),
            toml.and_then(|t| t.api.app_token.as_deref()),
        );
        let secret_key = resolve_secret(
            cli.secret_key.as_deref(),
            toml.and_then(|t| t.api.secret_key.as_deref()),
        );
        let webhook_secret = resolve_secret(
            cli.webhook_secret.as_deref(),
            toml.and_then(|t| t.webhook.secret_key.as_deref()),
        );

        let transport = Self::build_transport(cli, toml)?;

        Ok(Self {
            host,
            app_token,
            secret_key,
            webhook_secret,
            transport,
            config_file: None,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, that file must exist. Otherwise the default
    /// file (see [`default_config_path`]) is read when present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        Self::load_with_fallback(cli, default_config_path().as_deref())
    }

    /// Like [`load`](Self::load) with an explicit fallback path.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_with_fallback(cli: &Cli, fallback: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match (&cli.config, fallback) {
            (Some(path), _) => Some(path.clone()),
            (None, Some(path)) if path.is_file() => Some(path.to_path_buf()),
            (None, _) => None,
        };

        let toml = path.as_deref().map(TomlConfig::load).transpose()?;

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.config_file = path;
        Ok(config)
    }

    /// Returns the application token and signing key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] naming the first missing one.
    pub fn api_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let token = self.app_token.as_ref().ok_or_else(|| {
            ConfigError::missing(
                field::APP_TOKEN,
                "Use --app-token, set SUMSUB_APP_TOKEN or set api.app_token in config file",
            )
        })?;

        Ok((token.expose(), self.signing_key()?))
    }

    /// Returns the request signing key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if it is not configured.
    pub fn signing_key(&self) -> Result<&str, ConfigError> {
        self.secret_key.as_ref().map(Secret::expose).ok_or_else(|| {
            ConfigError::missing(
                field::SECRET_KEY,
                "Use --secret-key, set SUMSUB_SECRET_KEY or set api.secret_key in config file",
            )
        })
    }

    /// Returns the webhook digest key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] if it is not configured.
    pub fn webhook_secret(&self) -> Result<&str, ConfigError> {
        self.webhook_secret.as_ref().map(Secret::expose).ok_or_else(|| {
            ConfigError::missing(
                field::WEBHOOK_SECRET,
                "Use --webhook-secret, set SUMSUB_WEBHOOK_SECRET or set webhook.secret_key in config file",
            )
        })
    }

    fn resolve_host(cli: &Cli, toml: Option<&TomlConfig>) -> Result<String, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let host = cli
            .host
            .as_deref()
            .or_else(|| toml.and_then(|t| t.api.host.as_deref()))
            .unwrap_or(defaults::HOST)
            .trim();

        let invalid = |reason: &str| ConfigError::InvalidHost {
            host: host.to_string(),
            reason: reason.to_string(),
        };

        if host.is_empty() {
            return Err(invalid("must not be empty"));
        }
        if host.contains("://") {
            return Err(invalid("give the host only; HTTPS is always used"));
        }

        Ok(host.to_string())
    }

    fn build_transport(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<TransportConfig, ConfigError> {
        let section = toml.map(|t| &t.transport);

        let timeout = cli
            .timeout
            .or_else(|| section.and_then(|s| s.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);
        let connect_timeout = section
            .and_then(|s| s.connect_timeout)
            .unwrap_or(defaults::CONNECT_TIMEOUT_SECS);
        let tcp_keepalive = section
            .and_then(|s| s.tcp_keepalive)
            .unwrap_or(defaults::TCP_KEEPALIVE_SECS);

        // --no-proxy only disables
        let use_env_proxy = !cli.no_proxy && section.and_then(|s| s.use_env_proxy).unwrap_or(true);

        Ok(TransportConfig::new()
            .with_timeout(non_zero("timeout", timeout)?)
            .with_connect_timeout(non_zero("connect_timeout", connect_timeout)?)
            .with_tcp_keepalive(non_zero("tcp_keepalive", tcp_keepalive)?)
            .with_env_proxy(use_env_proxy))
    }
}

/// Returns `<config_dir>/sumsub/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::APP_DIR).join(defaults::CONFIG_FILE))
}

/// Picks the `init` output path: the explicit one, else [`default_config_path`].
///
/// # Errors
///
/// Returns [`ConfigError::NoConfigDir`] if neither is available.
pub fn init_path(output: Option<&Path>) -> Result<PathBuf, ConfigError> {
    output
        .map(Path::to_path_buf)
        .or_else(default_config_path)
        .ok_or(ConfigError::NoConfigDir)
}

/// Writes the default configuration template to a file.
///
/// Missing parent directories are created. An existing file is only
/// replaced when `force` is set.
///
/// # Errors
///
/// Returns an error if the file exists (without `force`) or cannot be written.
pub fn write_default_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::FileExists(path.to_path_buf()));
    }

    let write_error = |e: std::io::Error| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(write_error)
}

// Helper functions

fn resolve_secret(cli: Option<&str>, toml: Option<&str>) -> Option<Secret> {
    cli.filter(|s| !s.is_empty())
        .or_else(|| toml.filter(|s| !s.is_empty()))
        .map(Secret::new)
}

fn non_zero(field: &'static str, seconds: u64) -> Result<Duration, ConfigError> {
    if seconds == 0 {
        return Err(ConfigError::InvalidDuration {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(Duration::from_secs(seconds))
}
