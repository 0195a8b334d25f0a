use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format (text, json)
    #[serde(default)]
    pub format: LogFormat,

    /// Directory holding the log file (if None, events are discarded)
    #[serde(default = "default_log_dir")]
    pub log_dir: Option<PathBuf>,

    /// Log file name inside `log_dir`
    #[serde(default = "default_file_name")]
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
            log_dir: default_log_dir(),
            file_name: default_file_name(),
        }
    }
}

fn default_log_level() -> String {
    "debug".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_log_dir() -> Option<PathBuf> {
    Some(std::env::temp_dir())
}

fn default_file_name() -> String {
    "vault-creds.log".to_string()
}
