//! Reference Publication Capability
//!
//! Writes generated [`ApiReference`] documents to wherever a deployment
//! keeps them, typically object storage consumed by documentation tooling.
//! The composer drives this capability; implementations only perform the
//! write.

use async_trait::async_trait;

use portico_core::effects::credentials::StorageCredentials;

use crate::reference::ApiReference;

/// Where a reference document is written.
#[derive(Debug, Clone)]
pub struct PublishDestination {
    /// Target bucket, when the publisher is bucket-addressed.
    pub bucket: Option<String>,
    /// Credentials resolved for this publication, when a provider is
    /// configured.
    pub credentials: Option<StorageCredentials>,
}

/// Publication capability for reference documents.
#[async_trait]
pub trait ReferencePublisher: Send + Sync {
    /// Write `reference` to `destination`.
    async fn publish(
        &self,
        reference: &ApiReference,
        destination: &PublishDestination,
    ) -> Result<(), PublishError>;
}

/// A publication attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("publishing reference to {} failed: {message}", .bucket.as_deref().unwrap_or("<default destination>"))]
pub struct PublishError {
    /// Bucket the write was addressed to, when known.
    pub bucket: Option<String>,
    /// Publisher-specific description.
    pub message: String,
}

impl PublishError {
    /// Build an error for `bucket`.
    pub fn new(bucket: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            bucket: bucket.map(str::to_string),
            message: message.into(),
        }
    }
}
