//! Endpoint Declarations
//!
//! [`DeclareOptions`] is one endpoint as the author writes it; [`Entry`] is
//! the same endpoint after the registry has validated it, compiled its
//! validators, and attached its handler. Only the registry constructs
//! entries, so holding an [`Entry`] is proof the declaration passed every
//! check.

use std::sync::Arc;

use indexmap::IndexMap;

use portico_core::effects::handler::{ApiHandler, PayloadCleaner};
use portico_core::method::HttpMethod;
use portico_core::route::RoutePattern;
use portico_core::schema::{OutputSchema, SchemaRef};
use portico_core::scope::ScopeTemplate;
use portico_core::stability::Stability;
use portico_core::validator::{Validator, ValidatorSpec};

/// One endpoint declaration, handed to [`ApiBuilder::declare`].
///
/// `method`, `route`, and `name` are set at construction; `title` and
/// `description` are required too but attached with the chainable helpers,
/// and their absence is a declaration error rather than a compile error.
///
/// [`ApiBuilder::declare`]: crate::builder::ApiBuilder::declare
#[derive(Clone, Default)]
pub struct DeclareOptions {
    /// Request verb.
    pub method: Option<HttpMethod>,
    /// Route string with `:param` placeholders.
    pub route: String,
    /// Unique endpoint name, used as the client method name.
    pub name: String,
    /// Documentation title.
    pub title: String,
    /// Documentation description.
    pub description: String,
    /// Stability level. Defaults to experimental when omitted.
    pub stability: Option<Stability>,
    /// Per-entry parameter validators, overriding surface-wide fallbacks.
    pub params: IndexMap<String, ValidatorSpec>,
    /// Accepted query keys and their validators.
    pub query: IndexMap<String, ValidatorSpec>,
    /// Authorization requirement. `None` declares a public endpoint.
    pub scopes: Option<ScopeTemplate>,
    /// Request payload schema.
    pub input: Option<SchemaRef>,
    /// Response payload schema or blob marker.
    pub output: Option<OutputSchema>,
    /// Skip request payload validation while still documenting `input`.
    pub skip_input_validation: bool,
    /// Skip response payload validation while still documenting `output`.
    pub skip_output_validation: bool,
    /// Exclude this entry from published reference documents.
    pub no_publish: bool,
    /// Redaction hook applied to payloads before they reach diagnostics.
    pub clean_payload: Option<PayloadCleaner>,
    /// Legacy option. Declaring with `true` is rejected; authorization is
    /// always expressed as scope templates.
    pub defer_auth: bool,
}

impl DeclareOptions {
    /// A declaration with the addressing fields set and everything else
    /// empty.
    pub fn new(method: HttpMethod, route: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            method: Some(method),
            route: route.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the documentation title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the documentation description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stability level.
    pub fn with_stability(mut self, stability: Stability) -> Self {
        self.stability = Some(stability);
        self
    }

    /// Add a per-entry parameter validator.
    pub fn with_param(mut self, name: impl Into<String>, spec: ValidatorSpec) -> Self {
        self.params.insert(name.into(), spec);
        self
    }

    /// Declare an accepted query key.
    pub fn with_query(mut self, key: impl Into<String>, spec: ValidatorSpec) -> Self {
        self.query.insert(key.into(), spec);
        self
    }

    /// Set the authorization requirement.
    pub fn with_scopes(mut self, scopes: ScopeTemplate) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Declare the request payload schema.
    pub fn with_input(mut self, input: impl Into<SchemaRef>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Declare the response payload.
    pub fn with_output(mut self, output: OutputSchema) -> Self {
        self.output = Some(output);
        self
    }

    /// Document the input schema without validating requests against it.
    pub fn skip_input_validation(mut self) -> Self {
        self.skip_input_validation = true;
        self
    }

    /// Document the output schema without validating responses against it.
    pub fn skip_output_validation(mut self) -> Self {
        self.skip_output_validation = true;
        self
    }

    /// Exclude the entry from published references.
    pub fn no_publish(mut self) -> Self {
        self.no_publish = true;
        self
    }

    /// Attach a payload redaction hook.
    pub fn with_clean_payload<F>(mut self, cleaner: F) -> Self
    where
        F: Fn(serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
    {
        self.clean_payload = Some(Arc::new(cleaner));
        self
    }
}

impl std::fmt::Debug for DeclareOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclareOptions")
            .field("method", &self.method)
            .field("route", &self.route)
            .field("name", &self.name)
            .field("stability", &self.stability)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("scopes", &self.scopes)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("no_publish", &self.no_publish)
            .field("clean_payload", &self.clean_payload.is_some())
            .finish_non_exhaustive()
    }
}

/// A validated, accepted endpoint.
#[derive(Clone)]
#[non_exhaustive]
pub struct Entry {
    /// Request verb.
    pub method: HttpMethod,
    /// Parsed route pattern.
    pub route: RoutePattern,
    /// Unique endpoint name.
    pub name: String,
    /// Documentation title.
    pub title: String,
    /// Documentation description.
    pub description: String,
    /// Stability level, defaulted when the declaration omitted it.
    pub stability: Stability,
    /// Compiled parameter validators: surface-wide fallbacks overlaid with
    /// per-entry declarations.
    pub params: IndexMap<String, Validator>,
    /// Compiled query validators.
    pub query: IndexMap<String, Validator>,
    /// Authorization requirement.
    pub scopes: Option<ScopeTemplate>,
    /// Request payload schema.
    pub input: Option<SchemaRef>,
    /// Response payload declaration.
    pub output: Option<OutputSchema>,
    /// Whether request payload validation is skipped.
    pub skip_input_validation: bool,
    /// Whether response payload validation is skipped.
    pub skip_output_validation: bool,
    /// Whether the entry is excluded from published references.
    pub no_publish: bool,
    /// Payload redaction hook.
    pub clean_payload: Option<PayloadCleaner>,
    /// Author-supplied request handler.
    pub handler: Arc<dyn ApiHandler>,
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("method", &self.method)
            .field("route", &self.route.as_str())
            .field("name", &self.name)
            .field("stability", &self.stability)
            .field("scopes", &self.scopes)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("no_publish", &self.no_publish)
            .finish_non_exhaustive()
    }
}
