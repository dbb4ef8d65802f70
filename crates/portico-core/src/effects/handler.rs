//! Request Handler Capability
//!
//! The handler is the author-supplied behavior of an endpoint. The registry
//! stores handlers as opaque trait objects and never invokes them; runtime
//! adapters call [`ApiHandler::handle`] after routing and validation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::effects::context::ServiceContext;
use crate::method::HttpMethod;

/// Redaction hook applied to request payloads before they are logged or
/// attached to diagnostics. Returns the payload with sensitive fields
/// removed or replaced.
pub type PayloadCleaner = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// A parsed request, as a runtime adapter hands it to a handler.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Request verb.
    pub method: HttpMethod,
    /// Request path, already stripped of the service prefix.
    pub path: String,
    /// Route parameter bindings, keyed by placeholder name.
    pub params: HashMap<String, String>,
    /// Query string values, keyed by declared query key.
    pub query: HashMap<String, String>,
    /// Parsed JSON body, when the request carried one.
    pub payload: Option<Value>,
}

impl ApiRequest {
    /// A request with no parameters, query, or payload.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: HashMap::new(),
            query: HashMap::new(),
            payload: None,
        }
    }

    /// Bind one route parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Set one query value.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Attach a JSON payload.
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// A successful handler response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status to respond with.
    pub status: u16,
    /// JSON body, when the response carries one.
    pub body: Option<Value>,
}

impl ApiResponse {
    /// A `200 OK` response with a JSON body.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    /// A bodyless response with the given status.
    pub fn empty(status: u16) -> Self {
        Self { status, body: None }
    }
}

/// A coded rejection returned by a handler.
///
/// The runtime maps `code` to an HTTP status through the surface's
/// error-code table; unknown codes are treated as internal errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    /// Error-code identifier, e.g. `"ResourceNotFound"`.
    pub code: String,
    /// Human-readable description for the caller.
    pub message: String,
    /// Structured details attached to the response body.
    pub details: Option<Value>,
}

impl ApiError {
    /// An error with no structured details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attach structured details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Author-supplied behavior of one endpoint.
#[async_trait]
pub trait ApiHandler: Send + Sync {
    /// Handle one request.
    ///
    /// The runtime has already routed the request, bound `params`, and run
    /// the declared validators before this is called.
    async fn handle(
        &self,
        request: ApiRequest,
        context: Arc<dyn ServiceContext>,
    ) -> Result<ApiResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::context::EmptyContext;

    struct Greeter;

    #[async_trait]
    impl ApiHandler for Greeter {
        async fn handle(
            &self,
            request: ApiRequest,
            _context: Arc<dyn ServiceContext>,
        ) -> Result<ApiResponse, ApiError> {
            let name = request
                .params
                .get("name")
                .ok_or_else(|| ApiError::new("InvalidRequestArguments", "missing name"))?;
            Ok(ApiResponse::ok(serde_json::json!({ "greeting": format!("hello {name}") })))
        }
    }

    #[tokio::test]
    async fn handler_reads_bound_params() {
        let request = ApiRequest::new(HttpMethod::Get, "/greet/ada").with_param("name", "ada");
        let response = Greeter.handle(request, Arc::new(EmptyContext)).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(
            response.body,
            Some(serde_json::json!({ "greeting": "hello ada" }))
        );
    }

    #[tokio::test]
    async fn handler_rejects_with_coded_error() {
        let request = ApiRequest::new(HttpMethod::Get, "/greet/nobody");
        let error = Greeter
            .handle(request, Arc::new(EmptyContext))
            .await
            .unwrap_err();
        assert_eq!(error.code, "InvalidRequestArguments");
    }

    #[test]
    fn request_builders_accumulate() {
        let request = ApiRequest::new(HttpMethod::Post, "/widgets")
            .with_query("limit", "10")
            .with_payload(serde_json::json!({ "name": "w" }));
        assert_eq!(request.query.get("limit").map(String::as_str), Some("10"));
        assert!(request.payload.is_some());
    }
}
