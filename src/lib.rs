//! docker-credential-vault - Docker credential helper backed by HashiCorp Vault
//!
//! Docker runs the helper as `docker-credential-vault get`, writes a registry
//! URL to its stdin and expects a JSON login on stdout. The helper encodes the
//! URL into a Vault path (`secret/<base64 of URL>`), reads the secret there and
//! maps its `serverurl`, `username` and `password` fields onto Docker's
//! `ServerURL`, `Username` and `Secret`.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): Credential records, lookup keys, configuration
//!   and the secret store port
//! - **Service Layer** (`services`): Credential lookup and payload rendering
//! - **Infrastructure Layer** (`infrastructure`): Vault client, config loader, logging
//! - **CLI Layer** (`cli`): Command-line interface and exit behaviour
//!
//! # Example
//!
//! ```ignore
//! use docker_credential_vault::infrastructure::vault::MockSecretStore;
//! use docker_credential_vault::services::CredentialService;
//!
//! let store = MockSecretStore::new().with_secret(
//!     "secret/cmVnaXN0cnkuZXhhbXBsZS5jb20=",
//!     serde_json::json!({"username": "bot", "password": "s3cr3t"}),
//! );
//! let payload = CredentialService::new(store).get(b"registry.example.com\n").await?;
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::CredentialError;
pub use domain::models::{Config, ConfigOverrides, CredentialRecord, LookupKey};
pub use domain::ports::SecretStore;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::logging::{LogConfig, LogFormat, LogSink};
pub use infrastructure::vault::{VaultClient, VaultError};
pub use services::CredentialService;
