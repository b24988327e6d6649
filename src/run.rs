//! Command execution logic.
//!
//! Each subcommand turns into at most one API call (or a purely local
//! computation) and produces a JSON value for the entry point to print.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::Method;
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use sumsub_client::api::models::{
    AccessTokenRequest, ApplicantLookup, NewApplicant, NewFixedInfo, WebSdkLinkRequest,
};
use sumsub_client::api::{self, Client, ClientConfig};
use sumsub_client::config::{
    ApiCommand, Command, ConfigError, ValidatedConfig, defaults, init_path, write_default_config,
};
use sumsub_client::signer::{HmacSigner, Signer};
use sumsub_client::time::{Clock, SystemClock, unix_seconds};
use sumsub_client::transport::{HttpClient, HttpError, ReqwestClient};
use sumsub_client::webhook::{VerifyError, verify_digest};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration is missing or invalid for this command.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Transport(#[source] HttpError),

    /// The API call failed.
    #[error("API call failed: {0}")]
    Api(#[from] api::Error),

    /// The webhook payload did not verify.
    #[error("Webhook verification failed: {0}")]
    Verify(#[from] VerifyError),

    /// The method given to `sign` is not an HTTP method.
    #[error("Invalid HTTP method '{0}'")]
    InvalidMethod(String),

    /// The webhook payload could not be read.
    #[error("Failed to read payload '{}': {source}", path.display())]
    PayloadRead {
        /// Path given on the command line
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The result could not be rendered as JSON.
    #[error("Failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
}

impl RunError {
    /// Returns true if the failure is the user's configuration rather than
    /// the service, the network or the payload.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::InvalidMethod(_)
                | Self::Api(api::Error::InvalidHost { .. } | api::Error::InvalidToken(_))
        )
    }
}

/// Executes one command.
///
/// # Errors
///
/// Returns [`RunError`] if the command's credentials are missing, the call
/// fails, or the webhook payload does not verify.
#[cfg(not(tarpaulin_include))]
pub async fn execute(command: Command, config: &ValidatedConfig) -> Result<Value, RunError> {
    match command {
        Command::Init { output, force } => {
            let path = init_config(output.as_deref(), force)?;
            Ok(json!({ "written": path.display().to_string() }))
        }
        Command::Sign {
            method,
            uri,
            body,
            timestamp,
        } => {
            let signer = HmacSigner::new(config.signing_key()?);
            sign_request(&signer, &SystemClock, &method, &uri, body.as_deref(), timestamp)
        }
        Command::VerifyWebhook {
            algorithm,
            digest,
            file,
        } => {
            let payload = read_payload(&file)?;
            verify_payload(config.webhook_secret()?, &algorithm, &digest, &payload)
        }
        Command::Api(api_command) => {
            let client = build_client(config)?;
            call_api(&client, api_command).await
        }
    }
}

/// Resolves the output path and writes the config template.
///
/// # Errors
///
/// Returns [`ConfigError`] if no path is available or the write fails.
pub fn init_config(output: Option<&Path>, force: bool) -> Result<PathBuf, ConfigError> {
    let path = init_path(output)?;
    write_default_config(&path, force)?;
    Ok(path)
}

/// Builds the production API client from configuration.
fn build_client(config: &ValidatedConfig) -> Result<Client, RunError> {
    let (token, secret) = config.api_credentials()?;
    let http = ReqwestClient::with_config(&config.transport).map_err(RunError::Transport)?;

    let client_config = ClientConfig {
        host: config.host.clone(),
        http,
        clock: SystemClock,
    };

    tracing::debug!(host = %config.host, "API client ready");
    Ok(Client::new(token, HmacSigner::new(secret), client_config)?)
}

/// Runs an API subcommand against `client`.
async fn call_api<S, H, C>(
    client: &Client<S, H, C>,
    command: ApiCommand,
) -> Result<Value, RunError>
where
    S: Signer,
    H: HttpClient,
    C: Clock,
{
    match command {
        ApiCommand::Health => {
            client.health().await?;
            Ok(json!({ "status": "ok" }))
        }
        ApiCommand::AccessToken {
            user_id,
            level_name,
            ttl,
        } => {
            let req = AccessTokenRequest {
                user_id,
                level_name,
                ttl: ttl.map_or_else(defaults::access_token_ttl, Duration::from_secs),
            };
            to_json(&client.generate_access_token(&req).await?)
        }
        ApiCommand::WebsdkLink {
            level_name,
            user_id,
            ttl,
            lang,
        } => {
            let req = WebSdkLinkRequest {
                level_name,
                user_id,
                ttl: ttl.map_or_else(defaults::websdk_link_ttl, Duration::from_secs),
                lang: lang.unwrap_or_else(|| defaults::LANG.to_string()),
            };
            to_json(&client.generate_websdk_link(&req).await?)
        }
        ApiCommand::ReviewStatus { applicant_id } => {
            to_json(&client.applicant_review_status(&applicant_id).await?)
        }
        ApiCommand::Applicant {
            id,
            external_user_id,
        } => {
            let lookup = match (id, external_user_id) {
                (Some(id), _) => ApplicantLookup::Id(id),
                (None, external) => ApplicantLookup::ExternalUserId(external.unwrap_or_default()),
            };
            to_json(&client.applicant_data(&lookup).await?)
        }
        ApiCommand::CreateApplicant {
            external_user_id,
            first_name,
            last_name,
            dob,
            email,
            phone,
        } => {
            let applicant = NewApplicant {
                fixed_info: NewFixedInfo {
                    first_name,
                    last_name,
                    dob,
                },
                external_user_id,
                email,
                phone,
            };
            to_json(&client.create_applicant(&applicant).await?)
        }
    }
}

/// Computes the request signature the dispatcher would send.
fn sign_request(
    signer: &impl Signer,
    clock: &impl Clock,
    method: &str,
    uri: &str,
    body: Option<&str>,
    timestamp: Option<i64>,
) -> Result<Value, RunError> {
    let method = method
        .to_ascii_uppercase()
        .parse::<Method>()
        .map_err(|_| RunError::InvalidMethod(method.to_string()))?;
    let timestamp = timestamp.unwrap_or_else(|| unix_seconds(clock.now()));
    let payload = body.unwrap_or_default().as_bytes();

    let signature = signer.sign(timestamp, &method, uri, payload);

    Ok(json!({
        "method": method.as_str(),
        "uri": uri,
        "timestamp": timestamp,
        "signature": signature,
    }))
}

/// Reads the webhook payload from a file, or stdin for `-`.
fn read_payload(path: &Path) -> Result<Vec<u8>, RunError> {
    let read_error = |source: std::io::Error| RunError::PayloadRead {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        let mut payload = Vec::new();
        std::io::stdin()
            .read_to_end(&mut payload)
            .map_err(read_error)?;
        return Ok(payload);
    }

    std::fs::read(path).map_err(read_error)
}

/// Checks a webhook payload against its digest headers.
fn verify_payload(
    secret: &str,
    algorithm: &str,
    digest: &str,
    payload: &[u8],
) -> Result<Value, RunError> {
    verify_digest(payload, secret.as_bytes(), algorithm, digest)?;

    tracing::info!(algorithm, bytes = payload.len(), "Webhook digest verified");
    Ok(json!({ "valid": true, "algorithm": algorithm }))
}

fn to_json(value: &impl Serialize) -> Result<Value, RunError> {
    serde_json::to_value(value).map_err(RunError::Output)
}
