//! Command-line interface
//!
//! Resolves configuration, opens the diagnostic sink for the lifetime of the
//! request and maps command failures onto the helper's exit behaviour.

pub mod commands;
pub mod types;

pub use types::{Cli, Commands};

use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error};

use crate::domain::errors::CredentialError;
use crate::domain::models::Config;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::logging::LogSink;

/// Message Docker's credential-helper client reads as "no credentials stored"
pub const NOT_FOUND_MESSAGE: &str = "credentials not found in native keychain";

/// Run the parsed command line to completion.
///
/// The log sink is held until this function returns, so it is flushed and
/// closed on every path, including failures.
pub async fn run(cli: Cli) -> ExitCode {
    let loaded = ConfigLoader::new()
        .with_config_file(cli.config.clone())
        .with_overrides(cli.overrides())
        .load();

    let (config, config_error) = match loaded {
        Ok(config) => (config, None),
        Err(err) => (
            Config {
                strict: cli.strict,
                ..Config::default()
            },
            Some(err),
        ),
    };

    let _sink = LogSink::open(&config.logging).unwrap_or_else(|err| {
        eprintln!("docker-credential-vault: {err:#}");
        LogSink::disabled()
    });
    debug!("Initializing...");

    if let Some(err) = config_error {
        let message = format!("{err:#}");
        error!(error = %message, "Error reading config");
        return report_failure(config.strict, &message, io::stdout());
    }
    debug!(?config, "Read in config");

    let result = match cli.command {
        Commands::Get(_) => commands::get::execute(&config, io::stdin(), io::stdout()).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => handle_error(&err, config.strict),
    }
}

/// Log a failed request and choose the exit behaviour for it
pub fn handle_error(err: &CredentialError, strict: bool) -> ExitCode {
    error!(kind = err.kind(), error = %err, "Credential request failed");

    let message = if err.is_not_found() {
        NOT_FOUND_MESSAGE.to_string()
    } else {
        err.to_string()
    };
    report_failure(strict, &message, io::stdout())
}

/// Exit behaviour on failure.
///
/// By default stdout stays empty and the status is success; callers detect
/// the failure from the missing payload. In strict mode the message goes to
/// stdout, where Docker's helper client reads it, and the status is 1.
pub fn report_failure<W: Write>(strict: bool, message: &str, mut out: W) -> ExitCode {
    if !strict {
        return ExitCode::SUCCESS;
    }

    if let Err(err) = writeln!(out, "{message}").and_then(|()| out.flush()) {
        error!(error = %err, "Failed to report error on stdout");
    }
    ExitCode::FAILURE
}
