//! Credentials Capability
//!
//! Reference publication writes to external object storage. Credentials are
//! fetched through this capability at publication time rather than carried
//! in configuration, so rotation never requires recomposing the service.

use async_trait::async_trait;

/// Temporary credentials for an object-storage destination.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    /// Access key identifier.
    pub access_key_id: String,
    /// Secret key. Redacted from `Debug` output.
    pub secret_access_key: String,
    /// Session token for temporary credentials.
    pub session_token: Option<String>,
    /// Storage region the credentials are scoped to.
    pub region: String,
}

impl std::fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .field("region", &self.region)
            .finish()
    }
}

/// Source of storage credentials for reference publication.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Fetch credentials for the publication destination.
    async fn storage_credentials(&self) -> Result<StorageCredentials, CredentialsError>;
}

/// Credentials could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("credentials unavailable: {message}")]
pub struct CredentialsError {
    /// Provider-specific description.
    pub message: String,
}

impl CredentialsError {
    /// Build an error with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secrets() {
        let credentials = StorageCredentials {
            access_key_id: "AKIA-TEST".to_string(),
            secret_access_key: "super-secret".to_string(),
            session_token: Some("session-secret".to_string()),
            region: "us-west-2".to_string(),
        };
        let rendered = format!("{credentials:?}");
        assert!(rendered.contains("AKIA-TEST"));
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("session-secret"));
    }
}
