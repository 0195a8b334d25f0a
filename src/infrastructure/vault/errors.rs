use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to Vault
#[derive(Error, Debug)]
pub enum VaultError {
    /// The configured address does not form a usable base URL
    #[error("Invalid vault address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The HTTP client could not be built (TLS backend, settings)
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Token missing, expired or lacking policy (HTTP 401, 403)
    #[error("Permission denied ({0}): {1}")]
    PermissionDenied(StatusCode, String),

    /// Vault is sealed, in standby or failing (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Any other non-success status
    #[error("Unexpected response ({0}): {1}")]
    UnexpectedStatus(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl VaultError {
    /// Classify a non-success, non-404 status
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::PermissionDenied(status, body),
            s if s.is_server_error() => Self::ServerError(status, body),
            _ => Self::UnexpectedStatus(status, body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_classification() {
        assert!(matches!(
            VaultError::from_status(StatusCode::FORBIDDEN, "permission denied".to_string()),
            VaultError::PermissionDenied(StatusCode::FORBIDDEN, _)
        ));
        assert!(matches!(
            VaultError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            VaultError::PermissionDenied(..)
        ));
        assert!(matches!(
            VaultError::from_status(StatusCode::SERVICE_UNAVAILABLE, "Vault is sealed".to_string()),
            VaultError::ServerError(StatusCode::SERVICE_UNAVAILABLE, _)
        ));
        assert!(matches!(
            VaultError::from_status(StatusCode::BAD_REQUEST, String::new()),
            VaultError::UnexpectedStatus(StatusCode::BAD_REQUEST, _)
        ));
    }

    #[test]
    fn test_display_includes_body() {
        let err = VaultError::from_status(StatusCode::FORBIDDEN, "permission denied".to_string());
        assert_eq!(err.to_string(), "Permission denied (403 Forbidden): permission denied");
    }
}
