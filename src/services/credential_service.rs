//! Credential retrieval
//!
//! Translates a registry URL read from Docker into a secret read and the
//! secret into the JSON payload Docker expects.

use tracing::{debug, info, instrument};

use crate::domain::errors::CredentialError;
use crate::domain::models::{lookup_key, CredentialRecord, LookupKey};
use crate::domain::ports::SecretStore;
use crate::infrastructure::logging::SecretScrubber;

/// Looks up registry credentials in a secret store
pub struct CredentialService<S> {
    store: S,
    scrubber: SecretScrubber,
}

impl<S: SecretStore> CredentialService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            scrubber: SecretScrubber::new(),
        }
    }

    #[cfg(test)]
    pub(crate) const fn store(&self) -> &S {
        &self.store
    }

    /// Find the credentials stored for the registry URL in `raw_input`.
    ///
    /// # Errors
    /// * `StoreRead` - the store could not be read
    /// * `SecretNotFound` - nothing is stored for the URL
    /// * `Decode` - the stored payload is not a flat map of string fields
    #[instrument(skip_all)]
    pub async fn lookup(&self, raw_input: &[u8]) -> Result<CredentialRecord, CredentialError> {
        let input = lookup_key::normalize(raw_input);
        let input_text = String::from_utf8_lossy(input);
        debug!(input = %input_text, "Input for get");

        let key = LookupKey::encode(input);
        debug!(%key, "Base64 of input");

        let data = self
            .store
            .read(&key.store_path())
            .await
            .map_err(CredentialError::StoreRead)?;

        let Some(data) = data else {
            return Err(CredentialError::SecretNotFound {
                input: input_text.into_owned(),
                key: key.to_string(),
            });
        };

        CredentialRecord::from_secret_data(&data)
    }

    /// Serialize `record` to the stdout payload.
    pub fn render(&self, record: &CredentialRecord) -> Result<Vec<u8>, CredentialError> {
        let payload = record.to_json_bytes()?;
        debug!(
            payload = %self.scrubber.scrub_message(&String::from_utf8_lossy(&payload)),
            "Creds being returned"
        );
        Ok(payload)
    }

    /// Look up and render in one step.
    pub async fn get(&self, raw_input: &[u8]) -> Result<Vec<u8>, CredentialError> {
        let record = self.lookup(raw_input).await?;
        let payload = self.render(&record)?;
        info!(server_url = %record.server_url, username = %record.username, "Credentials found");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::vault::MockSecretStore;
    use serde_json::json;

    fn registry_store() -> MockSecretStore {
        MockSecretStore::new().with_secret(
            "secret/cmVnaXN0cnkuZXhhbXBsZS5jb20=",
            json!({
                "serverurl": "registry.example.com",
                "username": "bot",
                "password": "s3cr3t"
            }),
        )
    }

    #[tokio::test]
    async fn test_get_returns_docker_payload() {
        let service = CredentialService::new(registry_store());

        let payload = service.get(b"registry.example.com").await.unwrap();
        assert_eq!(
            String::from_utf8(payload).unwrap(),
            r#"{"ServerURL":"registry.example.com","Username":"bot","Secret":"s3cr3t"}"#
        );
    }

    #[tokio::test]
    async fn test_trailing_newline_gives_same_payload() {
        let service = CredentialService::new(registry_store());

        let with_newline = service.get(b"registry.example.com\n").await.unwrap();
        let without = service.get(b"registry.example.com").await.unwrap();
        assert_eq!(with_newline, without);
    }

    #[tokio::test]
    async fn test_repeated_gets_are_identical() {
        let service = CredentialService::new(registry_store());

        let first = service.get(b"registry.example.com").await.unwrap();
        let second = service.get(b"registry.example.com").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(service.store().reads(), 2);
    }

    #[tokio::test]
    async fn test_not_found_reports_input_and_key() {
        let service = CredentialService::new(registry_store());

        let err = service.get(b"other.example.com\n").await.unwrap_err();
        match err {
            CredentialError::SecretNotFound { input, key } => {
                assert_eq!(input, "other.example.com");
                assert_eq!(key, "b3RoZXIuZXhhbXBsZS5jb20=");
            }
            other => panic!("Expected SecretNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_input_is_not_found() {
        let service = CredentialService::new(registry_store());

        let err = service.get(b"").await.unwrap_err();
        assert!(matches!(
            err,
            CredentialError::SecretNotFound { ref input, ref key } if input.is_empty() && key.is_empty()
        ));
    }

    #[tokio::test]
    async fn test_store_failure_is_read_error() {
        let service = CredentialService::new(MockSecretStore::failing("permission denied"));

        let err = service.get(b"registry.example.com").await.unwrap_err();
        assert!(matches!(err, CredentialError::StoreRead(_)));
        assert!(err.to_string().contains("permission denied"));
    }

    #[tokio::test]
    async fn test_partial_record_is_returned() {
        let store = MockSecretStore::new()
            .with_secret("secret/eA==", json!({"serverurl": "x"}));
        let service = CredentialService::new(store);

        let payload = service.get(b"x").await.unwrap();
        assert_eq!(
            String::from_utf8(payload).unwrap(),
            r#"{"ServerURL":"x","Username":"","Secret":""}"#
        );
    }

    #[tokio::test]
    async fn test_malformed_payload_is_decode_error() {
        let store = MockSecretStore::new().with_secret("secret/eA==", json!("just a string"));
        let service = CredentialService::new(store);

        let err = service.get(b"x").await.unwrap_err();
        assert!(matches!(err, CredentialError::Decode(_)));
    }
}
