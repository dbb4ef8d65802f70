//! Entry Registry
//!
//! Ordered collection of accepted endpoint declarations. Every declaration
//! passes the full validation sequence before anything is stored, so a
//! failed declaration leaves the registry exactly as it was, and iteration
//! always yields entries in declaration order.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use portico_core::effects::handler::ApiHandler;
use portico_core::effects::scopes::ScopeValidator;
use portico_core::method::HttpMethod;
use portico_core::route::RoutePattern;
use portico_core::validator::Validator;

use crate::entry::{DeclareOptions, Entry};
use crate::errors::DeclarationError;

/// Ordered registry of accepted entries with uniqueness indexes.
#[derive(Debug, Default)]
pub struct EntryRegistry {
    entries: Vec<Entry>,
    routes: HashSet<(HttpMethod, String)>,
    names: HashSet<String>,
}

impl EntryRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted entries in declaration order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of accepted entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate one declaration and, if every check passes, append it.
    ///
    /// `fallback_params` are the surface-wide parameter validators; a
    /// per-entry validator overrides the fallback for the same name.
    /// Duplicate detection compares declared route strings verbatim, so
    /// `/w/:a` and `/w/:b` are distinct even though they match the same
    /// requests.
    pub fn declare(
        &mut self,
        fallback_params: &IndexMap<String, Validator>,
        scope_validator: &dyn ScopeValidator,
        options: DeclareOptions,
        handler: Arc<dyn ApiHandler>,
    ) -> Result<(), DeclarationError> {
        // Required fields. The route is parsed here as well; a malformed
        // route is that field's own validation failure.
        let method = options
            .method
            .ok_or(DeclarationError::MissingField { field: "method" })?;
        let name = required(options.name, "name")?;
        let raw_route = required(options.route, "route")?;
        let route = RoutePattern::parse(&raw_route)?;
        let title = required(options.title, "title")?;
        let description = required(options.description, "description")?;

        // Absent stability defaults to experimental.
        let stability = options.stability.unwrap_or_default();

        // Merge parameter validators, entry declarations winning per key.
        let mut params = fallback_params.clone();
        for (param, spec) in &options.params {
            let validator =
                spec.compile()
                    .map_err(|source| DeclarationError::InvalidParamPattern {
                        param: param.clone(),
                        source,
                    })?;
            params.insert(param.clone(), validator);
        }

        // Compile query validators.
        let mut query = IndexMap::with_capacity(options.query.len());
        for (key, spec) in &options.query {
            let validator = spec
                .compile()
                .map_err(|source| DeclarationError::InvalidQueryPattern {
                    key: key.clone(),
                    source,
                })?;
            query.insert(key.clone(), validator);
        }

        if options.defer_auth {
            return Err(DeclarationError::DeferredAuthUnsupported);
        }

        if let Some(template) = &options.scopes {
            if !scope_validator.validate(template) {
                return Err(DeclarationError::InvalidScopes {
                    template: template.clone(),
                });
            }
        }

        let route_key = (method, route.as_str().to_string());
        if self.routes.contains(&route_key) {
            return Err(DeclarationError::DuplicateRoute {
                method,
                route: route.as_str().to_string(),
            });
        }
        if self.names.contains(&name) {
            return Err(DeclarationError::DuplicateName { name });
        }

        let entry = Entry {
            method,
            route,
            name,
            title,
            description,
            stability,
            params,
            query,
            scopes: options.scopes,
            input: options.input,
            output: options.output,
            skip_input_validation: options.skip_input_validation,
            skip_output_validation: options.skip_output_validation,
            no_publish: options.no_publish,
            clean_payload: options.clean_payload,
            handler,
        };

        debug!(
            name = %entry.name,
            method = %entry.method,
            route = %entry.route,
            stability = %entry.stability,
            "declared endpoint"
        );

        self.routes.insert(route_key);
        self.names.insert(entry.name.clone());
        self.entries.push(entry);
        Ok(())
    }
}

fn required(value: String, field: &'static str) -> Result<String, DeclarationError> {
    if value.is_empty() {
        Err(DeclarationError::MissingField { field })
    } else {
        Ok(value)
    }
}
