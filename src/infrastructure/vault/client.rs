/// Vault HTTP API client implementation
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, StatusCode, Url};
use std::time::Duration;
use tracing::{debug, warn};

use super::{errors::VaultError, types::SecretResponse};
use crate::domain::models::Config;
use crate::domain::ports::{secret_store, SecretData, SecretStore};

const TOKEN_HEADER: &str = "X-Vault-Token";

/// Read-only client for the Vault logical API
pub struct VaultClient {
    /// HTTP client, one request per helper invocation
    http_client: ReqwestClient,

    /// `<scheme>://<host>:<port>` of the Vault server
    base_url: Url,

    /// Token for authentication; sent only when non-empty
    token: String,
}

impl VaultClient {
    /// Create a client for the address and token in `config`
    ///
    /// # Errors
    /// * `VaultError::InvalidAddress` - host, scheme or port do not form a URL
    /// * `VaultError::ClientBuild` - the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, VaultError> {
        let base_url = base_url(config)?;

        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.tls_skip_verify)
            .build()
            .map_err(VaultError::ClientBuild)?;

        if config.token.is_empty() {
            warn!("No vault token configured, reading without authentication");
        }

        Ok(Self {
            http_client,
            base_url,
            token: config.token.clone(),
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/v1/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Logical read of `path`
    ///
    /// Mirrors Vault's own client: a 404 or a response without data means
    /// there is no secret at the path.
    pub async fn read_secret(&self, path: &str) -> Result<Option<SecretData>, VaultError> {
        let endpoint = self.endpoint(path);
        debug!(%endpoint, "Reading secret from vault");

        let mut request = self.http_client.get(&endpoint);
        if !self.token.is_empty() {
            request = request.header(TOKEN_HEADER, &self.token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            debug!(path, "Vault returned 404");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            return Err(VaultError::from_status(status, body));
        }

        let body = response.bytes().await?;
        if body.trim_ascii().is_empty() {
            debug!(path, %status, "Vault returned an empty body");
            return Ok(None);
        }

        let secret: SecretResponse = serde_json::from_slice(&body)?;
        if let Some(warnings) = secret.warnings.as_deref().filter(|w| !w.is_empty()) {
            warn!(?warnings, "Vault returned warnings");
        }
        debug!(
            request_id = secret.request_id.as_deref().unwrap_or_default(),
            has_data = secret.data.is_some(),
            "Vault read completed"
        );

        Ok(secret.data)
    }
}

#[async_trait]
impl SecretStore for VaultClient {
    async fn read(&self, path: &str) -> secret_store::Result<Option<SecretData>> {
        Ok(self.read_secret(path).await?)
    }
}

/// Build the server URL from `config`
///
/// A `vault` value that already carries a scheme is used as given; a bare
/// host is combined with `scheme` and `port`.
fn base_url(config: &Config) -> Result<Url, VaultError> {
    let host = config.vault.trim();
    let address = if host.contains("://") {
        host.to_string()
    } else {
        format!("{}://{}:{}", config.scheme, host, config.port)
    };

    let invalid = |reason: String| VaultError::InvalidAddress {
        address: address.clone(),
        reason,
    };

    if host.is_empty() {
        return Err(invalid("host is empty".to_string()));
    }

    let url = Url::parse(&address).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}
