use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::models::config::{Config, ConfigOverrides};

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    MissingConfigFile(PathBuf),

    #[error("Vault host cannot be empty")]
    EmptyVaultHost,

    #[error("Invalid port: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Invalid scheme: {0}. Must be one of: http, https")]
    InvalidScheme(String),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Log file name cannot be empty")]
    EmptyLogFileName,
}

/// Environment prefix for every configuration key
pub const ENV_PREFIX: &str = "DOCKER_CREDENTIAL_VAULT_";

/// Unprefixed variables read for compatibility with existing setups
pub const LEGACY_ENV_KEYS: [&str; 3] = ["vault", "port", "token"];

/// Base names probed in each search directory
const CONFIG_FILE_NAMES: [&str; 2] = ["config.yaml", "config.yml"];

/// Configuration loader with hierarchical merging
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_dirs: Vec<PathBuf>,
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader over the standard search directories, without overrides
    pub fn new() -> Self {
        Self {
            search_dirs: default_search_dirs(),
            config_file: None,
            overrides: ConfigOverrides::default(),
        }
    }

    /// Replace the directories probed for `config.yaml`
    #[must_use]
    pub fn with_search_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.search_dirs = dirs;
        self
    }

    /// Use `path` instead of searching for a config file
    #[must_use]
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Apply values given on the command line
    #[must_use]
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `config.yaml` from each search directory, later directories winning,
    ///    or only the explicit `--config` file when one is given
    /// 3. `VAULT`, `PORT` and `TOKEN` environment variables
    /// 4. `DOCKER_CREDENTIAL_VAULT_*` environment variables (`__` nests)
    /// 5. Command-line flags
    pub fn load(&self) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        for file in self.config_files()? {
            figment = figment.merge(Yaml::file(file));
        }

        let config: Config = figment
            .merge(Env::raw().only(&LEGACY_ENV_KEYS))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Serialized::defaults(&self.overrides))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn config_files(&self) -> Result<Vec<PathBuf>, ConfigError> {
        if let Some(ref explicit) = self.config_file {
            if !explicit.is_file() {
                return Err(ConfigError::MissingConfigFile(explicit.clone()));
            }
            return Ok(vec![explicit.clone()]);
        }

        Ok(self
            .search_dirs
            .iter()
            .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .filter(|path| path.is_file())
            .collect())
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.vault.trim().is_empty() {
            return Err(ConfigError::EmptyVaultHost);
        }

        if config.port == 0 {
            return Err(ConfigError::InvalidPort(config.port));
        }

        if !matches!(config.scheme.as_str(), "http" | "https") {
            return Err(ConfigError::InvalidScheme(config.scheme.clone()));
        }

        if config.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.logging.file_name.trim().is_empty() {
            return Err(ConfigError::EmptyLogFileName);
        }

        Ok(())
    }
}

/// System directory, then the user's, then the working directory
fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("/etc/docker/vault-credential-helper")];
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join(".docker/vault-credential-helper"));
    }
    dirs.push(PathBuf::from("."));
    dirs
}
