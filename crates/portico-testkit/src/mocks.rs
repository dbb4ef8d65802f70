//! Mock Capability Implementations
//!
//! Every capability seam gets a deterministic double. Recording mocks keep
//! what they saw behind a mutex so tests can assert on interactions;
//! failing variants are constructed with the exact error they should
//! produce.

use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;

use portico_core::effects::context::ServiceContext;
use portico_core::effects::credentials::{CredentialsError, CredentialsProvider, StorageCredentials};
use portico_core::effects::handler::{ApiError, ApiHandler, ApiRequest, ApiResponse};
use portico_core::effects::nonce::{NonceManager, ReplayedNonce};
use portico_core::effects::payload::{PayloadValidator, PayloadViolation};
use portico_core::effects::scopes::ScopeValidator;
use portico_core::route::RouteSegment;
use portico_core::schema::SchemaRef;
use portico_core::scope::ScopeTemplate;
use portico_registry::{ApiSurface, Entry};
use portico_service::{
    ApiReference, PublishDestination, PublishError, ReferencePublisher, RoutableService,
    RoutingError, RuntimeConfig, RuntimeError, ServiceRuntime,
};

// === Scope validators ===

/// Accepts every scope template, well formed or not.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllScopes;

impl ScopeValidator for AcceptAllScopes {
    fn validate(&self, _template: &ScopeTemplate) -> bool {
        true
    }
}

/// Rejects every scope template.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectAllScopes;

impl ScopeValidator for RejectAllScopes {
    fn validate(&self, _template: &ScopeTemplate) -> bool {
        false
    }
}

// === Payload validators ===

/// Accepts every payload against every schema.
#[derive(Debug, Default, Clone, Copy)]
pub struct PermissivePayloads;

impl PayloadValidator for PermissivePayloads {
    fn validate(&self, _reference: &SchemaRef, _payload: &Value) -> Result<(), PayloadViolation> {
        Ok(())
    }
}

/// Rejects every payload with a fixed detail message.
#[derive(Debug, Clone)]
pub struct RejectingPayloads {
    /// Detail attached to every violation.
    pub detail: String,
}

impl RejectingPayloads {
    /// A validator rejecting with `detail`.
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl PayloadValidator for RejectingPayloads {
    fn validate(&self, reference: &SchemaRef, _payload: &Value) -> Result<(), PayloadViolation> {
        Err(PayloadViolation::new(reference.clone(), self.detail.clone()))
    }
}

// === Handlers ===

/// Handler answering every request with a fixed response.
pub struct StaticHandler {
    response: ApiResponse,
}

impl StaticHandler {
    /// A handler that always returns `response`.
    pub fn new(response: ApiResponse) -> Self {
        Self { response }
    }
}

#[async_trait]
impl ApiHandler for StaticHandler {
    async fn handle(
        &self,
        _request: ApiRequest,
        _context: Arc<dyn ServiceContext>,
    ) -> Result<ApiResponse, ApiError> {
        Ok(self.response.clone())
    }
}

/// Handler echoing the request back as the response body.
#[derive(Debug, Default, Clone, Copy)]
pub struct EchoHandler;

#[async_trait]
impl ApiHandler for EchoHandler {
    async fn handle(
        &self,
        request: ApiRequest,
        _context: Arc<dyn ServiceContext>,
    ) -> Result<ApiResponse, ApiError> {
        Ok(ApiResponse::ok(serde_json::json!({
            "method": request.method.as_str(),
            "path": request.path,
            "params": request.params,
            "query": request.query,
            "payload": request.payload,
        })))
    }
}

/// Handler failing every request with a fixed coded error.
pub struct RejectingHandler {
    error: ApiError,
}

impl RejectingHandler {
    /// A handler that always returns `error`.
    pub fn new(error: ApiError) -> Self {
        Self { error }
    }
}

#[async_trait]
impl ApiHandler for RejectingHandler {
    async fn handle(
        &self,
        _request: ApiRequest,
        _context: Arc<dyn ServiceContext>,
    ) -> Result<ApiResponse, ApiError> {
        Err(self.error.clone())
    }
}

// === Context ===

/// Context backed by a name-to-value map.
///
/// Handlers downcast with [`ServiceContext::as_any`] and read values by
/// name through [`MapContext::value`].
#[derive(Debug, Default, Clone)]
pub struct MapContext {
    values: HashMap<String, Value>,
}

impl MapContext {
    /// An empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named capability value.
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// The value registered under `name`.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

impl ServiceContext for MapContext {
    fn capability_names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// === Credentials ===

/// Provider returning the same credentials on every call.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: StorageCredentials,
}

impl StaticCredentials {
    /// A provider returning `credentials`.
    pub fn new(credentials: StorageCredentials) -> Self {
        Self { credentials }
    }

    /// A provider with recognizable placeholder values.
    pub fn example() -> Self {
        Self::new(StorageCredentials {
            access_key_id: "AKIA-TESTKIT".to_string(),
            secret_access_key: "testkit-secret".to_string(),
            session_token: None,
            region: "us-test-1".to_string(),
        })
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentials {
    async fn storage_credentials(&self) -> Result<StorageCredentials, CredentialsError> {
        Ok(self.credentials.clone())
    }
}

/// Provider failing every call.
#[derive(Debug, Clone)]
pub struct FailingCredentials {
    error: CredentialsError,
}

impl FailingCredentials {
    /// A provider failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: CredentialsError::new(message),
        }
    }
}

#[async_trait]
impl CredentialsProvider for FailingCredentials {
    async fn storage_credentials(&self) -> Result<StorageCredentials, CredentialsError> {
        Err(self.error.clone())
    }
}

// === Nonces ===

/// In-memory nonce store.
#[derive(Debug, Default)]
pub struct MemoryNonces {
    seen: Mutex<HashSet<(String, String)>>,
}

impl MemoryNonces {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NonceManager for MemoryNonces {
    async fn remember(&self, key_id: &str, nonce: &str) -> Result<(), ReplayedNonce> {
        let mut seen = self.seen.lock().unwrap();
        if seen.insert((key_id.to_string(), nonce.to_string())) {
            Ok(())
        } else {
            Err(ReplayedNonce {
                key_id: key_id.to_string(),
                nonce: nonce.to_string(),
            })
        }
    }
}

// === Publisher ===

/// Publisher that records every publication, optionally failing instead.
#[derive(Default)]
pub struct RecordingPublisher {
    records: Mutex<Vec<(ApiReference, PublishDestination)>>,
    fail_with: Option<PublishError>,
}

impl RecordingPublisher {
    /// A publisher that accepts and records everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher that records the attempt, then fails with `error`.
    pub fn failing(error: PublishError) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    /// Number of publish attempts observed.
    pub fn publish_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// The most recent publication, when one happened.
    pub fn last(&self) -> Option<(ApiReference, PublishDestination)> {
        self.records.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReferencePublisher for RecordingPublisher {
    async fn publish(
        &self,
        reference: &ApiReference,
        destination: &PublishDestination,
    ) -> Result<(), PublishError> {
        self.records
            .lock()
            .unwrap()
            .push((reference.clone(), destination.clone()));
        match &self.fail_with {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

// === Runtime ===

/// Deterministic in-memory runtime.
///
/// Materialization records the [`RuntimeConfig`] it received; the routable
/// service it returns matches requests against the surface's declared
/// routes, runs parameter and query validators, and maps handler error
/// codes to statuses through the surface's error-code table.
#[derive(Default)]
pub struct MockRuntime {
    configs: Mutex<Vec<RuntimeConfig>>,
    fail_with: Mutex<Option<RuntimeError>>,
}

impl MockRuntime {
    /// A runtime that materializes successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next materialization fail with `error`.
    pub fn fail_next(&self, error: RuntimeError) {
        *self.fail_with.lock().unwrap() = Some(error);
    }

    /// Number of materializations observed.
    pub fn materialize_count(&self) -> usize {
        self.configs.lock().unwrap().len()
    }

    /// The most recently received config.
    pub fn last_config(&self) -> Option<RuntimeConfig> {
        self.configs.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ServiceRuntime for MockRuntime {
    async fn materialize(
        &self,
        config: RuntimeConfig,
    ) -> Result<Box<dyn RoutableService>, RuntimeError> {
        if let Some(error) = self.fail_with.lock().unwrap().take() {
            return Err(error);
        }
        let routable = MockRoutable {
            surface: Arc::clone(&config.surface),
            context: Arc::clone(&config.context),
        };
        self.configs.lock().unwrap().push(config);
        Ok(Box::new(routable))
    }
}

/// Routable service returned by [`MockRuntime`].
struct MockRoutable {
    surface: Arc<ApiSurface>,
    context: Arc<dyn ServiceContext>,
}

#[async_trait]
impl RoutableService for MockRoutable {
    async fn route(&self, request: ApiRequest) -> Result<ApiResponse, RoutingError> {
        let path_segments = split_path(&request.path);
        for entry in &self.surface.entries {
            if entry.method != request.method {
                continue;
            }
            let Some(bindings) = match_segments(entry, &path_segments) else {
                continue;
            };
            trace!(entry = %entry.name, path = %request.path, "matched declared route");
            return self.dispatch(entry, bindings, request).await;
        }
        Err(RoutingError::NotFound {
            method: request.method,
            path: request.path,
        })
    }
}

impl MockRoutable {
    async fn dispatch(
        &self,
        entry: &Entry,
        bindings: HashMap<String, String>,
        mut request: ApiRequest,
    ) -> Result<ApiResponse, RoutingError> {
        // Declared parameter validators run against the bound values.
        for (param, value) in &bindings {
            if let Some(validator) = entry.params.get(param) {
                validator
                    .check(value)
                    .map_err(|message| RoutingError::InvalidParam {
                        param: param.clone(),
                        message,
                    })?;
            }
        }

        // Query keys must be declared, and their values must validate.
        for (key, value) in &request.query {
            match entry.query.get(key) {
                Some(validator) => validator
                    .check(value)
                    .map_err(|message| RoutingError::InvalidQuery {
                        key: key.clone(),
                        message,
                    })?,
                None => {
                    return Err(RoutingError::InvalidQuery {
                        key: key.clone(),
                        message: "query key is not declared for this endpoint".to_string(),
                    })
                }
            }
        }

        request.params = bindings;
        match entry.handler.handle(request, Arc::clone(&self.context)).await {
            Ok(response) => Ok(response),
            Err(error) => {
                // Unknown codes fall back to an internal error, matching
                // what a production adapter responds with.
                let status = self.surface.status_for(&error.code).unwrap_or(500);
                let mut body = serde_json::json!({
                    "code": error.code,
                    "message": error.message,
                });
                if let Some(details) = error.details {
                    body["details"] = details;
                }
                Ok(ApiResponse {
                    status,
                    body: Some(body),
                })
            }
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

fn match_segments(entry: &Entry, path_segments: &[&str]) -> Option<HashMap<String, String>> {
    let declared = entry.route.segments();
    if declared.len() != path_segments.len() {
        return None;
    }
    let mut bindings = HashMap::new();
    for (segment, value) in declared.iter().zip(path_segments) {
        match segment {
            RouteSegment::Literal(literal) => {
                if literal.as_str() != *value {
                    return None;
                }
            }
            RouteSegment::Param(name) => {
                bindings.insert(name.clone(), (*value).to_string());
            }
        }
    }
    Some(bindings)
}
