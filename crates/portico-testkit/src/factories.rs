//! Test Fixture Factories
//!
//! Canned builders and declarations for the widget service every surface
//! test keeps re-creating. Factories return fresh values each call, so a
//! test can mutate its fixture without affecting others.

use std::sync::Arc;

use portico_core::effects::handler::{ApiHandler, ApiResponse};
use portico_core::method::HttpMethod;
use portico_core::schema::OutputSchema;
use portico_core::scope::ScopeTemplate;
use portico_core::stability::Stability;
use portico_core::validator::ValidatorSpec;
use portico_registry::{ApiBuilder, BuilderOptions, DeclareOptions};

use crate::mocks::StaticHandler;

/// Builder options for the canonical widget service.
pub fn widget_builder_options() -> BuilderOptions {
    BuilderOptions::new(
        "widgets",
        "v1",
        "Widget Service",
        "Stores, lists, and retires widgets.",
    )
    .with_param("widgetId", ValidatorSpec::pattern("^[a-z][a-z0-9-]*$"))
}

/// A ready-to-use widget service builder.
pub fn widget_builder() -> ApiBuilder {
    ApiBuilder::new(widget_builder_options()).unwrap()
}

/// Declaration for fetching one widget.
pub fn declare_get_widget() -> DeclareOptions {
    DeclareOptions::new(HttpMethod::Get, "/widgets/:widgetId", "getWidget")
        .with_title("Get Widget")
        .with_description("Returns the widget with the given id.")
        .with_stability(Stability::Stable)
        .with_query("detail", ValidatorSpec::pattern("^(full|summary)$"))
        .with_scopes(ScopeTemplate::dnf([["widgets:get:<widgetId>"]]))
        .with_output(OutputSchema::schema("v1/widget.json"))
}

/// Declaration for creating a widget.
pub fn declare_create_widget() -> DeclareOptions {
    DeclareOptions::new(HttpMethod::Post, "/widgets", "createWidget")
        .with_title("Create Widget")
        .with_description("Creates a new widget.")
        .with_scopes(ScopeTemplate::dnf([["widgets:create"]]))
        .with_input("v1/create-widget-request.json")
        .with_output(OutputSchema::schema("v1/widget.json"))
}

/// Handler answering every request with an empty response of `status`.
pub fn ok_handler(status: u16) -> Arc<dyn ApiHandler> {
    Arc::new(StaticHandler::new(ApiResponse::empty(status)))
}

/// Handler answering every request with `200 OK` and `body`.
pub fn json_handler(body: serde_json::Value) -> Arc<dyn ApiHandler> {
    Arc::new(StaticHandler::new(ApiResponse::ok(body)))
}
