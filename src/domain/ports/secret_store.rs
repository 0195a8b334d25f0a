use async_trait::async_trait;

use crate::domain::errors::BoxError;

/// Field set returned by a secret read, as sent by the store.
pub type SecretData = serde_json::Value;

/// Result type for secret store operations
pub type Result<T> = std::result::Result<T, BoxError>;

/// Read side of a key-value secret backend.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Read the secret stored at `path`.
    ///
    /// Returns `Ok(None)` when the store answers but holds nothing at the
    /// path. Transport and authorization failures are errors.
    async fn read(&self, path: &str) -> Result<Option<SecretData>>;
}
