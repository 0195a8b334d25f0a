//! docker-credential-vault entry point.

use clap::Parser;
use std::process::ExitCode;

use docker_credential_vault::cli::{self, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Cli::parse();
    cli::run(args).await
}
