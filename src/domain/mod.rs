//! Domain layer for the credential helper
//!
//! Credential records, lookup keys, configuration and the secret store port.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{BoxError, CredentialError};
