//! Infrastructure layer module
//!
//! This module contains the infrastructure adapters and external integrations:
//! - Vault HTTP client
//! - Configuration management
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod logging;
pub mod vault;
