use serde::Deserialize;

use crate::domain::ports::SecretData;

/// Body of a successful `GET /v1/<path>` response.
///
/// Only the fields the helper reads or logs are modelled; Vault sends more.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretResponse {
    #[serde(default)]
    pub request_id: Option<String>,

    /// Secret payload. Absent or null means there is nothing at the path.
    #[serde(default)]
    pub data: Option<SecretData>,

    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}
