//! Domain errors for the credential helper.

use thiserror::Error;

/// Boxed error returned across the secret store port.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures of a single `get` request.
///
/// Every variant is terminal for the request: the helper logs it and
/// produces no credentials on stdout.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Error reading stdin: {0}")]
    InputRead(#[source] std::io::Error),

    #[error("Error creating vault client: {0}")]
    StoreConnection(#[source] BoxError),

    #[error("Error reading vault creds: {0}")]
    StoreRead(#[source] BoxError),

    #[error("No secret found in vault for '{input}' (key {key})")]
    SecretNotFound { input: String, key: String },

    #[error("Error parsing vault response: {0}")]
    Decode(String),

    #[error("Error serializing credentials: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Error writing credentials to stdout: {0}")]
    OutputWrite(#[source] std::io::Error),
}

impl CredentialError {
    /// Stable name of the failure kind, used to tag log lines.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InputRead(_) => "InputReadError",
            Self::StoreConnection(_) => "StoreConnectionError",
            Self::StoreRead(_) => "StoreReadError",
            Self::SecretNotFound { .. } => "SecretNotFound",
            Self::Decode(_) => "DecodeError",
            Self::Serialize(_) => "SerializeError",
            Self::OutputWrite(_) => "OutputWriteError",
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::SecretNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_input_and_key() {
        let err = CredentialError::SecretNotFound {
            input: "registry.example.com".to_string(),
            key: "cmVnaXN0cnkuZXhhbXBsZS5jb20=".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("registry.example.com"));
        assert!(message.contains("cmVnaXN0cnkuZXhhbXBsZS5jb20="));
        assert!(err.is_not_found());
        assert_eq!(err.kind(), "SecretNotFound");
    }

    #[test]
    fn test_kind_names() {
        let io = || std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        assert_eq!(CredentialError::InputRead(io()).kind(), "InputReadError");
        assert_eq!(CredentialError::OutputWrite(io()).kind(), "OutputWriteError");
        assert_eq!(
            CredentialError::StoreConnection("bad address".into()).kind(),
            "StoreConnectionError"
        );
        assert_eq!(CredentialError::StoreRead("denied".into()).kind(), "StoreReadError");
        assert_eq!(CredentialError::Decode("not a map".into()).kind(), "DecodeError");
        assert!(!CredentialError::Decode("x".into()).is_not_found());
    }
}
