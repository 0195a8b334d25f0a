//! HashiCorp Vault secret store
//!
//! Minimal HTTP client for the logical read API:
//! - Token authentication via `X-Vault-Token`
//! - 404 and empty responses reported as "no secret"
//! - Status classification for diagnostics

pub mod client;
pub mod errors;
pub mod mock_store;
pub mod types;

pub use client::VaultClient;
pub use errors::VaultError;
pub use mock_store::MockSecretStore;
pub use types::SecretResponse;
