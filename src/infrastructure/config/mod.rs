//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML file discovery in the helper's config directories
//! - Environment variable overrides
//! - Command-line flag overrides
//! - Configuration validation

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
