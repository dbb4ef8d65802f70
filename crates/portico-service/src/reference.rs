//! Reference Generation
//!
//! The machine-readable description of a composed surface, consumed by
//! documentation sites and client generators. Field names are camelCase on
//! the wire. Entries appear in declaration order; entries declared
//! `no_publish` are omitted entirely.

use serde::{Deserialize, Serialize};

use portico_core::identity::{ApiName, ApiVersion};
use portico_core::method::HttpMethod;
use portico_core::schema::{OutputSchema, SchemaRef};
use portico_core::scope::ScopeTemplate;
use portico_core::stability::Stability;
use portico_registry::{ApiSurface, Entry};

/// Format version stamped into every generated reference.
pub const REFERENCE_FORMAT_VERSION: u16 = 1;

/// Machine-readable description of one composed API surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiReference {
    /// Format version of this document.
    pub reference_format_version: u16,
    /// Service name.
    pub service_name: ApiName,
    /// Surface version.
    pub api_version: ApiVersion,
    /// Documentation title.
    pub title: String,
    /// Documentation description.
    pub description: String,
    /// Base URL clients should call.
    pub base_url: String,
    /// Published entries in declaration order.
    pub entries: Vec<ReferenceEntry>,
}

/// One published endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    /// Endpoint name, used as the client method name.
    pub name: String,
    /// Documentation title.
    pub title: String,
    /// Documentation description.
    pub description: String,
    /// Request verb.
    pub method: HttpMethod,
    /// Route with `:param` placeholders, as declared.
    pub route: String,
    /// Route placeholder names in path order.
    pub args: Vec<String>,
    /// Accepted query keys in declaration order.
    pub query: Vec<String>,
    /// Stability level.
    pub stability: Stability,
    /// Authorization requirement, when the endpoint is not public.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopes: Option<ScopeTemplate>,
    /// Request payload schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<SchemaRef>,
    /// Response payload schema or blob marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputSchema>,
}

impl ApiReference {
    /// Generate the reference for `surface`, advertising `base_url`.
    pub fn from_surface(surface: &ApiSurface, base_url: &str) -> Self {
        Self {
            reference_format_version: REFERENCE_FORMAT_VERSION,
            service_name: surface.name.clone(),
            api_version: surface.version.clone(),
            title: surface.title.clone(),
            description: surface.description.clone(),
            base_url: base_url.to_string(),
            entries: surface
                .entries
                .iter()
                .filter(|entry| !entry.no_publish)
                .map(ReferenceEntry::from_entry)
                .collect(),
        }
    }
}

impl ReferenceEntry {
    fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            method: entry.method,
            route: entry.route.as_str().to_string(),
            args: entry.route.placeholders().map(str::to_string).collect(),
            query: entry.query.keys().cloned().collect(),
            stability: entry.stability,
            scopes: entry.scopes.clone(),
            input: entry.input.clone(),
            output: entry.output.clone(),
        }
    }
}
