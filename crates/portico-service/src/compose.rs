//! Service Composition
//!
//! [`compose`] connects a declared surface to its runtime environment.
//! The sequence is fixed: snapshot the builder, check context coverage,
//! check publication preconditions, materialize the routable service, and
//! finally publish the reference when requested. Any failure aborts the
//! composition and no service is returned.
//!
//! Composition never mutates the builder, so composing the same builder
//! twice against the same options yields services over identical surfaces.

use std::sync::Arc;

use tracing::{debug, info};

use portico_core::effects::credentials::CredentialsProvider;
use portico_core::effects::handler::{ApiRequest, ApiResponse};
use portico_registry::{ApiBuilder, ApiSurface};

use crate::errors::BuildError;
use crate::options::RuntimeOptions;
use crate::publish::{PublishDestination, ReferencePublisher};
use crate::reference::ApiReference;
use crate::runtime::{RoutableService, RoutingError, RuntimeConfig};

/// A composed, routable service.
pub struct Service {
    surface: Arc<ApiSurface>,
    routable: Box<dyn RoutableService>,
    base_url: String,
    reference_bucket: Option<String>,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    publisher: Option<Arc<dyn ReferencePublisher>>,
}

/// Compose `builder`'s declared surface into a running service.
///
/// When `options.publish` is set, the reference document is published
/// before the service is returned; a publication failure fails the whole
/// composition.
pub async fn compose(
    builder: &ApiBuilder,
    options: RuntimeOptions,
) -> Result<Service, BuildError> {
    let surface = builder.surface();

    // Declared context capabilities must all be present before any
    // handler can observe a missing one.
    for name in &surface.context {
        if !options.context.contains(name) {
            return Err(BuildError::MissingContext { name: name.clone() });
        }
    }

    // Publication preconditions are checked before the runtime is built,
    // so a misconfigured publish fails fast.
    if options.publish && options.publisher.is_none() {
        return Err(BuildError::PublishNotConfigured);
    }

    let config = RuntimeConfig {
        surface: Arc::clone(&surface),
        root_url: options.root_url.clone(),
        input_limit: options.effective_input_limit(),
        allowed_cors_origin: options.allowed_cors_origin.clone(),
        context: Arc::clone(&options.context),
        validator: Arc::clone(&options.validator),
        nonce_manager: options.nonce_manager.clone(),
    };
    debug!(
        service = %surface.name,
        version = %surface.version,
        input_limit = config.input_limit,
        "materializing service runtime"
    );
    let routable = options
        .runtime
        .materialize(config)
        .await
        .map_err(BuildError::Runtime)?;

    let service = Service {
        surface: Arc::clone(&surface),
        routable,
        base_url: options.effective_base_url().to_string(),
        reference_bucket: options.reference_bucket.clone(),
        credentials: options.credentials.clone(),
        publisher: options.publisher.clone(),
    };

    if options.publish {
        service.publish().await?;
    }

    info!(
        service = %surface.name,
        version = %surface.version,
        entries = surface.entries.len(),
        published = options.publish,
        "composed service"
    );
    Ok(service)
}

impl Service {
    /// The surface this service was composed from.
    pub fn surface(&self) -> &ApiSurface {
        &self.surface
    }

    /// Generate the reference document this service advertises.
    pub fn reference(&self) -> ApiReference {
        ApiReference::from_surface(&self.surface, &self.base_url)
    }

    /// Publish the reference document.
    ///
    /// Credentials are resolved freshly on every call, so rotated
    /// credentials are picked up without recomposing.
    pub async fn publish(&self) -> Result<(), BuildError> {
        let publisher = self
            .publisher
            .as_ref()
            .ok_or(BuildError::PublishNotConfigured)?;

        let credentials = match &self.credentials {
            Some(provider) => Some(
                provider
                    .storage_credentials()
                    .await
                    .map_err(BuildError::Credentials)?,
            ),
            None => None,
        };

        let destination = PublishDestination {
            bucket: self.reference_bucket.clone(),
            credentials,
        };
        let reference = self.reference();
        publisher
            .publish(&reference, &destination)
            .await
            .map_err(BuildError::Publish)?;

        info!(
            service = %reference.service_name,
            version = %reference.api_version,
            entries = reference.entries.len(),
            "published api reference"
        );
        Ok(())
    }

    /// Route one parsed request to its declared handler.
    pub async fn handle(&self, request: ApiRequest) -> Result<ApiResponse, RoutingError> {
        self.routable.route(request).await
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("service", &self.surface.name)
            .field("version", &self.surface.version)
            .field("base_url", &self.base_url)
            .field("entries", &self.surface.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use portico_core::effects::context::ServiceContext;
    use portico_core::effects::handler::{ApiError, ApiHandler};
    use portico_core::effects::payload::{PayloadValidator, PayloadViolation};
    use portico_core::schema::SchemaRef;
    use portico_registry::BuilderOptions;

    use crate::publish::PublishError;
    use crate::runtime::{RuntimeError, ServiceRuntime};

    struct NoContent;

    #[async_trait]
    impl ApiHandler for NoContent {
        async fn handle(
            &self,
            _request: ApiRequest,
            _context: Arc<dyn ServiceContext>,
        ) -> Result<ApiResponse, ApiError> {
            Ok(ApiResponse::empty(204))
        }
    }

    struct AcceptAnyPayload;

    impl PayloadValidator for AcceptAnyPayload {
        fn validate(
            &self,
            _reference: &SchemaRef,
            _payload: &serde_json::Value,
        ) -> Result<(), PayloadViolation> {
            Ok(())
        }
    }

    /// Runtime that records the config it received and serves nothing.
    #[derive(Default)]
    struct InertRuntime {
        seen_limits: Mutex<Vec<usize>>,
    }

    struct InertRoutable;

    #[async_trait]
    impl RoutableService for InertRoutable {
        async fn route(&self, request: ApiRequest) -> Result<ApiResponse, RoutingError> {
            Err(RoutingError::NotFound {
                method: request.method,
                path: request.path,
            })
        }
    }

    #[async_trait]
    impl ServiceRuntime for InertRuntime {
        async fn materialize(
            &self,
            config: RuntimeConfig,
        ) -> Result<Box<dyn RoutableService>, RuntimeError> {
            #[allow(clippy::unwrap_used)]
            self.seen_limits.lock().unwrap().push(config.input_limit);
            Ok(Box::new(InertRoutable))
        }
    }

    fn builder_with_context(context: &[&str]) -> ApiBuilder {
        let mut options = BuilderOptions::new("widgets", "v1", "Widget Service", "Widgets.");
        for capability in context {
            options = options.with_context(*capability);
        }
        ApiBuilder::new(options).unwrap()
    }

    fn options_for(runtime: Arc<InertRuntime>) -> RuntimeOptions {
        RuntimeOptions::new("https://portico.example.com", runtime, Arc::new(AcceptAnyPayload))
    }

    #[tokio::test]
    async fn missing_context_capability_fails_composition() {
        let builder = builder_with_context(&["db"]);
        let runtime = Arc::new(InertRuntime::default());
        let error = compose(&builder, options_for(Arc::clone(&runtime)))
            .await
            .unwrap_err();
        assert!(matches!(error, BuildError::MissingContext { name } if name == "db"));
        // The runtime must never have been asked to materialize.
        assert!(runtime.seen_limits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn publish_without_publisher_fails_before_materialization() {
        let builder = builder_with_context(&[]);
        let runtime = Arc::new(InertRuntime::default());
        let options = options_for(Arc::clone(&runtime)).publish_on_build();
        let error = compose(&builder, options).await.unwrap_err();
        assert!(matches!(error, BuildError::PublishNotConfigured));
        assert!(runtime.seen_limits.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn input_limit_defaults_to_ten_mebibytes() {
        let builder = builder_with_context(&[]);
        let runtime = Arc::new(InertRuntime::default());
        compose(&builder, options_for(Arc::clone(&runtime))).await.unwrap();
        assert_eq!(
            runtime.seen_limits.lock().unwrap().as_slice(),
            &[10 * 1024 * 1024]
        );
    }

    #[tokio::test]
    async fn runtime_failures_propagate_with_their_cause() {
        struct FailingRuntime;

        #[async_trait]
        impl ServiceRuntime for FailingRuntime {
            async fn materialize(
                &self,
                _config: RuntimeConfig,
            ) -> Result<Box<dyn RoutableService>, RuntimeError> {
                Err(RuntimeError::new("listener refused"))
            }
        }

        let builder = builder_with_context(&[]);
        let options = RuntimeOptions::new(
            "https://portico.example.com",
            Arc::new(FailingRuntime),
            Arc::new(AcceptAnyPayload),
        );
        let error = compose(&builder, options).await.unwrap_err();
        assert!(matches!(error, BuildError::Runtime(ref inner) if inner.to_string() == "listener refused"));
    }

    #[tokio::test]
    async fn publish_on_a_service_without_publisher_is_rejected() {
        let mut builder = builder_with_context(&[]);
        builder
            .declare(
                portico_registry::DeclareOptions::new(
                    portico_core::method::HttpMethod::Get,
                    "/ping",
                    "ping",
                )
                .with_title("Ping")
                .with_description("Liveness probe."),
                Arc::new(NoContent),
            )
            .unwrap();
        let service = compose(&builder, options_for(Arc::new(InertRuntime::default())))
            .await
            .unwrap();
        assert!(matches!(
            service.publish().await,
            Err(BuildError::PublishNotConfigured)
        ));
    }

    #[tokio::test]
    async fn publish_failures_carry_the_publisher_cause() {
        struct RefusingPublisher;

        #[async_trait]
        impl ReferencePublisher for RefusingPublisher {
            async fn publish(
                &self,
                _reference: &ApiReference,
                destination: &PublishDestination,
            ) -> Result<(), PublishError> {
                Err(PublishError::new(destination.bucket.as_deref(), "access denied"))
            }
        }

        let builder = builder_with_context(&[]);
        let options = options_for(Arc::new(InertRuntime::default()))
            .publish_on_build()
            .with_reference_bucket("refs")
            .with_publisher(Arc::new(RefusingPublisher));
        let error = compose(&builder, options).await.unwrap_err();
        match error {
            BuildError::Publish(inner) => {
                assert_eq!(inner.bucket.as_deref(), Some("refs"));
                assert_eq!(inner.message, "access denied");
            }
            other => panic!("expected a publish failure, got {other:?}"),
        }
    }
}
