//! Service layer
//!
//! Request handling between the CLI and the secret store port.

pub mod credential_service;

pub use credential_service::CredentialService;
