//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::commands::get::GetArgs;
use crate::domain::models::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "docker-credential-vault")]
#[command(about = "A credential helper for vault")]
#[command(long_about = "Retrieves your docker registry credentials from HashiCorp Vault")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default is config.yaml in /etc/docker/vault-credential-helper,
    /// $HOME/.docker/vault-credential-helper or the current directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Vault host to authenticate against [default: vault.service.discover]
    #[arg(short = 'v', long, global = true, value_name = "HOST")]
    pub vault: Option<String>,

    /// Port of vault server to authenticate against [default: 8200]
    #[arg(short, long, global = true, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Vault token to authenticate with
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Report failures on stdout with a non-zero exit status
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Get credentials from vault
    Get(GetArgs),
}

impl Cli {
    /// Flags given on the command line, as the highest configuration layer
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            vault: self.vault.clone(),
            port: self.port,
            token: self.token.clone(),
            strict: self.strict.then_some(true),
        }
    }
}
