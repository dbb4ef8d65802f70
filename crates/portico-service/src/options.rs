//! Runtime Options
//!
//! [`RuntimeOptions`] describes the environment a surface is composed
//! into: deployment URLs, limits, the capabilities handlers get, and
//! whether the reference document is published. The composer is the only
//! consumer; authors construct options with the chainable helpers.

use std::sync::Arc;

use portico_core::effects::context::{EmptyContext, ServiceContext};
use portico_core::effects::credentials::CredentialsProvider;
use portico_core::effects::nonce::NonceManager;
use portico_core::effects::payload::PayloadValidator;

use crate::publish::ReferencePublisher;
use crate::runtime::ServiceRuntime;

/// Default maximum request payload size: 10 MiB.
pub const DEFAULT_INPUT_LIMIT: usize = 10 * 1024 * 1024;

/// Environment and capabilities for composing one service.
#[derive(Clone)]
pub struct RuntimeOptions {
    /// Root URL of the deployment.
    pub root_url: String,
    /// Maximum accepted request payload size. Defaults to
    /// [`DEFAULT_INPUT_LIMIT`] when unset.
    pub input_limit: Option<usize>,
    /// CORS origin to allow, when set.
    pub allowed_cors_origin: Option<String>,
    /// Capabilities available to handlers. Defaults to an empty context.
    pub context: Arc<dyn ServiceContext>,
    /// Payload validation capability.
    pub validator: Arc<dyn PayloadValidator>,
    /// Replay protection capability.
    pub nonce_manager: Option<Arc<dyn NonceManager>>,
    /// Runtime adapter that materializes the surface.
    pub runtime: Arc<dyn ServiceRuntime>,
    /// Publish the reference document as part of composition.
    pub publish: bool,
    /// Base URL advertised in the reference. Defaults to `root_url`.
    pub base_url: Option<String>,
    /// Storage bucket references are published to.
    pub reference_bucket: Option<String>,
    /// Credentials source for publication.
    pub credentials: Option<Arc<dyn CredentialsProvider>>,
    /// Publication capability. Required when `publish` is set.
    pub publisher: Option<Arc<dyn ReferencePublisher>>,
}

impl RuntimeOptions {
    /// Options with the required capabilities set and every optional knob
    /// at its default.
    pub fn new(
        root_url: impl Into<String>,
        runtime: Arc<dyn ServiceRuntime>,
        validator: Arc<dyn PayloadValidator>,
    ) -> Self {
        Self {
            root_url: root_url.into(),
            input_limit: None,
            allowed_cors_origin: None,
            context: Arc::new(EmptyContext),
            validator,
            nonce_manager: None,
            runtime,
            publish: false,
            base_url: None,
            reference_bucket: None,
            credentials: None,
            publisher: None,
        }
    }

    /// Override the request payload size limit.
    pub fn with_input_limit(mut self, limit: usize) -> Self {
        self.input_limit = Some(limit);
        self
    }

    /// Allow cross-origin requests from `origin`.
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_cors_origin = Some(origin.into());
        self
    }

    /// Provide the handler context.
    pub fn with_context(mut self, context: Arc<dyn ServiceContext>) -> Self {
        self.context = context;
        self
    }

    /// Provide a replay protection capability.
    pub fn with_nonce_manager(mut self, nonce_manager: Arc<dyn NonceManager>) -> Self {
        self.nonce_manager = Some(nonce_manager);
        self
    }

    /// Request reference publication during composition.
    pub fn publish_on_build(mut self) -> Self {
        self.publish = true;
        self
    }

    /// Advertise `base_url` in the reference instead of the root URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Publish references into `bucket`.
    pub fn with_reference_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.reference_bucket = Some(bucket.into());
        self
    }

    /// Provide a credentials source for publication.
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Provide the publication capability.
    pub fn with_publisher(mut self, publisher: Arc<dyn ReferencePublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// The effective payload size limit.
    pub fn effective_input_limit(&self) -> usize {
        self.input_limit.unwrap_or(DEFAULT_INPUT_LIMIT)
    }

    /// The effective base URL for reference documents.
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(&self.root_url)
    }
}

impl std::fmt::Debug for RuntimeOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeOptions")
            .field("root_url", &self.root_url)
            .field("input_limit", &self.input_limit)
            .field("allowed_cors_origin", &self.allowed_cors_origin)
            .field("publish", &self.publish)
            .field("base_url", &self.base_url)
            .field("reference_bucket", &self.reference_bucket)
            .field("publisher", &self.publisher.is_some())
            .finish_non_exhaustive()
    }
}
