//! Composition-Time Errors
//!
//! Everything that can go wrong between a validated surface and a running
//! service. One taxonomy covers both composition and publication, since a
//! publish requested at composition time fails the composition itself.

use portico_core::effects::credentials::CredentialsError;

use crate::publish::PublishError;
use crate::runtime::RuntimeError;

/// Failure while composing a service or publishing its reference.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The runtime context is missing a capability the surface declared.
    #[error("runtime context does not provide declared capability {name:?}")]
    MissingContext {
        /// The undeclared capability name.
        name: String,
    },
    /// Publication was requested without configuring a publisher.
    #[error("publish was requested but no reference publisher is configured")]
    PublishNotConfigured,
    /// The credentials provider failed.
    #[error("could not obtain publication credentials")]
    Credentials(#[source] CredentialsError),
    /// The service runtime failed to materialize the surface.
    #[error("service runtime construction failed")]
    Runtime(#[source] RuntimeError),
    /// The reference publisher reported a failure.
    #[error("reference publication failed")]
    Publish(#[source] PublishError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn sources_are_preserved_through_the_taxonomy() {
        let cause = PublishError::new(Some("refs-bucket"), "bucket does not exist");
        let error = BuildError::Publish(cause.clone());
        let source = error.source().expect("publish failures carry a source");
        assert_eq!(source.to_string(), cause.to_string());
    }

    #[test]
    fn missing_context_names_the_capability() {
        let error = BuildError::MissingContext {
            name: "db".to_string(),
        };
        assert!(error.to_string().contains("\"db\""));
    }
}
