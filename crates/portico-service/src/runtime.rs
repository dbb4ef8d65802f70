//! Runtime Construction Capability
//!
//! A [`ServiceRuntime`] adapts a declared surface to some concrete HTTP
//! stack. The composer hands it a [`RuntimeConfig`] and gets back a
//! [`RoutableService`] that routes parsed requests to declared handlers.
//! Production adapters wrap a real server framework; the test kit provides
//! a deterministic in-memory one.

use std::sync::Arc;

use async_trait::async_trait;

use portico_core::effects::context::ServiceContext;
use portico_core::effects::handler::{ApiRequest, ApiResponse};
use portico_core::effects::nonce::NonceManager;
use portico_core::effects::payload::PayloadValidator;
use portico_core::method::HttpMethod;
use portico_registry::ApiSurface;

/// Everything a runtime adapter receives at materialization time.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// The declared surface to serve.
    pub surface: Arc<ApiSurface>,
    /// Root URL of the deployment the service runs in.
    pub root_url: String,
    /// Maximum accepted request payload size in bytes.
    pub input_limit: usize,
    /// CORS origin to allow, when set.
    pub allowed_cors_origin: Option<String>,
    /// Capabilities available to handlers.
    pub context: Arc<dyn ServiceContext>,
    /// Payload validation capability.
    pub validator: Arc<dyn PayloadValidator>,
    /// Replay protection capability, for adapters verifying signed
    /// requests.
    pub nonce_manager: Option<Arc<dyn NonceManager>>,
}

impl std::fmt::Debug for RuntimeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeConfig")
            .field("surface", &self.surface.name)
            .field("root_url", &self.root_url)
            .field("input_limit", &self.input_limit)
            .field("allowed_cors_origin", &self.allowed_cors_origin)
            .field("nonce_manager", &self.nonce_manager.is_some())
            .finish_non_exhaustive()
    }
}

/// Materializes a routable service for a declared surface.
#[async_trait]
pub trait ServiceRuntime: Send + Sync {
    /// Build the routable service described by `config`.
    async fn materialize(&self, config: RuntimeConfig) -> Result<Box<dyn RoutableService>, RuntimeError>;
}

/// A materialized service that routes requests to declared handlers.
#[async_trait]
pub trait RoutableService: Send + Sync {
    /// Route one parsed request.
    async fn route(&self, request: ApiRequest) -> Result<ApiResponse, RoutingError>;
}

/// Runtime adapter failure while materializing a surface.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct RuntimeError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RuntimeError {
    /// An error with a description only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// An error wrapping an adapter-specific cause.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Request rejection produced while routing, before any handler runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    /// No declared entry matches the request.
    #[error("no declared entry matches {method} {path:?}")]
    NotFound {
        /// Request verb.
        method: HttpMethod,
        /// Request path.
        path: String,
    },
    /// A route parameter failed its declared validator.
    #[error("parameter {param:?} rejected: {message}")]
    InvalidParam {
        /// Parameter name.
        param: String,
        /// Validator rejection message.
        message: String,
    },
    /// A query value failed its declared validator, or an undeclared key
    /// was supplied.
    #[error("query key {key:?} rejected: {message}")]
    InvalidQuery {
        /// Query key.
        key: String,
        /// Validator rejection message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn runtime_errors_chain_their_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let error = RuntimeError::with_source("could not bind listener", cause);
        assert_eq!(error.to_string(), "could not bind listener");
        assert!(error.source().is_some());
    }

    #[test]
    fn routing_errors_describe_the_rejection() {
        let error = RoutingError::NotFound {
            method: HttpMethod::Get,
            path: "/nope".to_string(),
        };
        assert!(error.to_string().contains("GET"));
        assert!(error.to_string().contains("/nope"));
    }
}
