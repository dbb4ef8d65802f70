//! API Builder
//!
//! The facade a service author works with: construct it from
//! [`BuilderOptions`], declare endpoints one by one, then hand a
//! [`surface`](ApiBuilder::surface) snapshot to the composer. Construction
//! validates the surface-wide options; each declaration is validated by the
//! entry registry.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use portico_core::effects::handler::ApiHandler;
use portico_core::effects::scopes::{ScopeValidator, StructuralScopeValidator};
use portico_core::error_code::ErrorCodeTable;
use portico_core::identity::{ApiName, ApiVersion};
use portico_core::validator::Validator;

use crate::entry::{DeclareOptions, Entry};
use crate::errors::{ConfigurationError, DeclarationError};
use crate::options::{normalize, BuilderConfig, BuilderOptions};
use crate::registry::EntryRegistry;
use crate::surface::ApiSurface;

/// Declares a versioned, documented, scope-authorized API surface.
pub struct ApiBuilder {
    config: BuilderConfig,
    registry: EntryRegistry,
    scope_validator: Arc<dyn ScopeValidator>,
}

impl ApiBuilder {
    /// Validate `options` and produce a builder with an empty registry.
    ///
    /// Scope templates are checked with the shipped structural validator;
    /// use [`with_scope_validator`](Self::with_scope_validator) to supply a
    /// deployment-specific one.
    pub fn new(options: BuilderOptions) -> Result<Self, ConfigurationError> {
        Self::with_scope_validator(options, Arc::new(StructuralScopeValidator))
    }

    /// Validate `options` with an explicit scope-template validator.
    pub fn with_scope_validator(
        options: BuilderOptions,
        scope_validator: Arc<dyn ScopeValidator>,
    ) -> Result<Self, ConfigurationError> {
        let config = normalize(options)?;
        debug!(
            service = %config.name,
            version = %config.version,
            "constructed api builder"
        );
        Ok(Self {
            config,
            registry: EntryRegistry::new(),
            scope_validator,
        })
    }

    /// Declare one endpoint.
    ///
    /// On `Err` the declaration is discarded in full; the builder is left
    /// exactly as it was.
    pub fn declare(
        &mut self,
        options: DeclareOptions,
        handler: Arc<dyn ApiHandler>,
    ) -> Result<(), DeclarationError> {
        self.registry.declare(
            &self.config.params,
            self.scope_validator.as_ref(),
            options,
            handler,
        )
    }

    /// Service name.
    pub fn name(&self) -> &ApiName {
        &self.config.name
    }

    /// Surface version.
    pub fn version(&self) -> &ApiVersion {
        &self.config.version
    }

    /// Documentation title.
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Documentation description.
    pub fn description(&self) -> &str {
        &self.config.description
    }

    /// Surface-wide fallback parameter validators.
    pub fn params(&self) -> &IndexMap<String, Validator> {
        &self.config.params
    }

    /// Context capability names handlers expect.
    pub fn context(&self) -> &[String] {
        &self.config.context
    }

    /// Error-code table.
    pub fn error_codes(&self) -> &ErrorCodeTable {
        &self.config.error_codes
    }

    /// Accepted entries in declaration order.
    pub fn entries(&self) -> &[Entry] {
        self.registry.entries()
    }

    /// Take a read-only snapshot of the declared surface.
    ///
    /// The snapshot is independent of the builder: declaring further
    /// entries afterwards does not change it, and taking several snapshots
    /// from an unchanged builder yields identical surfaces.
    pub fn surface(&self) -> Arc<ApiSurface> {
        Arc::new(ApiSurface {
            name: self.config.name.clone(),
            version: self.config.version.clone(),
            title: self.config.title.clone(),
            description: self.config.description.clone(),
            params: self.config.params.clone(),
            context: self.config.context.clone(),
            error_codes: self.config.error_codes.clone(),
            entries: self.registry.entries().to_vec(),
        })
    }
}

impl std::fmt::Debug for ApiBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiBuilder")
            .field("name", &self.config.name)
            .field("version", &self.config.version)
            .field("entries", &self.registry.len())
            .finish_non_exhaustive()
    }
}
