use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::infrastructure::logging::LogConfig;

/// Main configuration structure for the credential helper
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Vault host name, or a full URL such as `https://vault.internal:8200`
    #[serde(default = "default_vault_host", deserialize_with = "deserialize_text")]
    pub vault: String,

    /// Vault port, used when `vault` is a bare host name
    #[serde(default = "default_vault_port", deserialize_with = "deserialize_port")]
    pub port: u16,

    /// Vault token sent as `X-Vault-Token`
    #[serde(default, deserialize_with = "deserialize_text")]
    pub token: String,

    /// URL scheme used when `vault` is a bare host name
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// HTTP timeout for the secret read
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Accept invalid TLS certificates from Vault
    #[serde(default)]
    pub tls_skip_verify: bool,

    /// Report failures through stdout and a non-zero exit status
    #[serde(default)]
    pub strict: bool,

    /// Diagnostic log configuration
    #[serde(default)]
    pub logging: LogConfig,
}

fn default_vault_host() -> String {
    "vault.service.discover".to_string()
}

const fn default_vault_port() -> u16 {
    8200
}

fn default_scheme() -> String {
    "https".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault: default_vault_host(),
            port: default_vault_port(),
            token: String::new(),
            scheme: default_scheme(),
            timeout_secs: default_timeout_secs(),
            tls_skip_verify: false,
            strict: false,
            logging: LogConfig::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("Config")
            .field("vault", &self.vault)
            .field("port", &self.port)
            .field("token", &token)
            .field("scheme", &self.scheme)
            .field("timeout_secs", &self.timeout_secs)
            .field("tls_skip_verify", &self.tls_skip_verify)
            .field("strict", &self.strict)
            .field("logging", &self.logging)
            .finish()
    }
}

/// Values given explicitly on the command line.
///
/// Unset fields are skipped so they never shadow lower configuration layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

/// Accept a port as an integer or a numeric string, in `1..=65535`.
fn deserialize_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match RawScalar::deserialize(deserializer)? {
        RawScalar::Integer(n) => u16::try_from(n).ok(),
        RawScalar::Text(text) => {
            return text
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or_else(|| de::Error::custom(format!("invalid port '{text}': expected 1-65535")));
        }
        RawScalar::Float(_) | RawScalar::Bool(_) => None,
    };

    parsed
        .filter(|port| *port != 0)
        .ok_or_else(|| de::Error::custom("invalid port: expected an integer in 1-65535"))
}

/// Accept strings, and scalars that environment parsing may have typed
/// (a numeric token, for instance), as text.
fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Text(text) => text,
        RawScalar::Integer(n) => n.to_string(),
        RawScalar::Float(n) => n.to_string(),
        RawScalar::Bool(b) => b.to_string(),
    })
}
