//! sumsub: client for the Sumsub identity verification API
//!
//! Entry point for the sumsub command-line tool.

use std::process::ExitCode;

use sumsub_client::config::{Cli, Command, ValidatedConfig};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Handle init subcommand before reading any config file
    if let Command::Init { output, force } = &cli.command {
        return handle_init(output.as_deref(), *force);
    }

    // Load and validate configuration
    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    // Setup logging and run
    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    run_command(cli.command, &config)
}

/// Handles the `init` subcommand.
fn handle_init(output: Option<&std::path::Path>, force: bool) -> ExitCode {
    match run::init_config(output, force) {
        Ok(path) => {
            println!("Configuration template written to: {}", path.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs one command and prints its result as pretty JSON.
///
/// Excluded from coverage - requires async runtime.
#[cfg(not(tarpaulin_include))]
fn run_command(command: Command, config: &ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to create Tokio runtime: {e}");
            return exit_code::runtime_error();
        }
    };

    match runtime.block_on(run::execute(command, config)) {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => {
                println!("{text}");
                exit_code::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: failed to encode output: {e}");
                exit_code::runtime_error()
            }
        },
        Err(e) if e.is_config() => {
            eprintln!("Configuration error: {e}");
            if let run::RunError::Config(config_error) = &e {
                print_config_hint(config_error);
            }
            exit_code::CONFIG_ERROR
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            if let Some(api) = sumsub_client::api::as_api_error(&e) {
                tracing::debug!(error_code = %api.error_code, name = %api.error_name, "Service error");
            }
            exit_code::runtime_error()
        }
    }
}
