//! In-memory secret store for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::ports::{secret_store, SecretData, SecretStore};

/// Secret store backed by a map of path to payload
#[derive(Debug, Default)]
pub struct MockSecretStore {
    secrets: HashMap<String, SecretData>,
    failure: Option<String>,
    reads: AtomicUsize,
}

impl MockSecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` at `path`
    #[must_use]
    pub fn with_secret(mut self, path: impl Into<String>, data: SecretData) -> Self {
        self.secrets.insert(path.into(), data);
        self
    }

    /// Fail every read with `message`
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Number of reads served so far
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SecretStore for MockSecretStore {
    async fn read(&self, path: &str) -> secret_store::Result<Option<SecretData>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(ref message) = self.failure {
            return Err(message.clone().into());
        }
        Ok(self.secrets.get(path).cloned())
    }
}
