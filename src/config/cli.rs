//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};

/// sumsub: client for the Sumsub identity verification API
///
/// Calls the API with signed requests and verifies webhook digests.
/// Credentials come from flags, the environment or the config file.
#[derive(Debug, Parser)]
#[command(name = "sumsub")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// API host (default: api.sumsub.com)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Application token
    #[arg(long = "app-token", env = "SUMSUB_APP_TOKEN", hide_env_values = true, global = true)]
    pub app_token: Option<String>,

    /// Secret key used to sign API requests
    #[arg(long = "secret-key", env = "SUMSUB_SECRET_KEY", hide_env_values = true, global = true)]
    pub secret_key: Option<String>,

    /// Secret key used to verify webhook digests
    #[arg(
        long = "webhook-secret",
        env = "SUMSUB_WEBHOOK_SECRET",
        hide_env_values = true,
        global = true
    )]
    pub webhook_secret: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Ignore proxies configured through the environment
    #[arg(long = "no-proxy", global = true)]
    pub no_proxy: bool,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for sumsub
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path (default: the user config directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Call the API
    #[command(flatten)]
    Api(ApiCommand),

    /// Print the signature for a request without sending it
    Sign {
        /// HTTP method
        #[arg(long, default_value = "GET")]
        method: String,

        /// Request path and query, e.g. /resources/applicants
        #[arg(long)]
        uri: String,

        /// Request body
        #[arg(long)]
        body: Option<String>,

        /// Unix timestamp to sign (default: now)
        #[arg(long, allow_negative_numbers = true)]
        timestamp: Option<i64>,
    },

    /// Verify a webhook payload against its digest
    VerifyWebhook {
        /// Value of the X-Payload-Digest-Alg header
        #[arg(long)]
        algorithm: String,

        /// Value of the X-Payload-Digest header
        #[arg(long)]
        digest: String,

        /// File holding the raw payload ('-' for stdin)
        file: PathBuf,
    },
}

/// Subcommands that make one signed API call
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ApiCommand {
    /// Check that the API is operational
    Health,

    /// Issue an SDK access token
    AccessToken {
        /// External user id the token is bound to
        #[arg(long = "user-id")]
        user_id: String,

        /// Verification level name
        #[arg(long = "level-name")]
        level_name: String,

        /// Token lifetime in seconds (default: 600)
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Create an external WebSDK link
    WebsdkLink {
        /// Verification level name
        #[arg(long = "level-name")]
        level_name: String,

        /// External user id
        #[arg(long = "user-id")]
        user_id: String,

        /// Link lifetime in seconds (default: 1800)
        #[arg(long)]
        ttl: Option<u64>,

        /// Interface language (default: en)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Show the review status of an applicant
    ReviewStatus {
        /// Applicant id
        applicant_id: String,
    },

    /// Show an applicant's data
    #[command(group(ArgGroup::new("lookup").required(true).args(["id", "external_user_id"])))]
    Applicant {
        /// Applicant id
        #[arg(long)]
        id: Option<String>,

        /// External user id
        #[arg(long = "external-user-id")]
        external_user_id: Option<String>,
    },

    /// Create an applicant
    CreateApplicant {
        /// External user id
        #[arg(long = "external-user-id")]
        external_user_id: String,

        /// First name
        #[arg(long = "first-name")]
        first_name: String,

        /// Last name
        #[arg(long = "last-name")]
        last_name: String,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<NaiveDate>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}

impl Command {
    /// Returns true if the command calls the API.
    #[must_use]
    pub const fn needs_api(&self) -> bool {
        matches!(self, Self::Api(_))
    }
}
