//! Portico Core - API Surface Vocabulary
//!
//! This crate provides the foundational types and capability interfaces for
//! declaring versioned, documented, scope-authorized HTTP API surfaces. It
//! contains only the declaration vocabulary and pure trait seams; registries,
//! composition, and runtime adapters live in the crates layered above.
//!
//! # Architecture Layers
//!
//! ## Declaration Vocabulary
//! - [`ApiName`] / [`ApiVersion`]: validated surface identifiers
//! - [`HttpMethod`] / [`RoutePattern`]: verbs and `:param` route shapes
//! - [`Stability`]: closed set of endpoint stability levels
//! - [`ValidatorSpec`] / [`Validator`]: declared and compiled value checks
//! - [`ScopeTemplate`]: authorization requirements in DNF or expression form
//! - [`SchemaRef`] / [`OutputSchema`]: payload schema references
//! - [`ErrorCodeTable`]: error-code identifiers mapped to HTTP statuses
//!
//! ## Capability Interfaces (Pure Signatures)
//! - [`ApiHandler`]: endpoint request handling
//! - [`ScopeValidator`]: scope-template shape acceptance
//! - [`PayloadValidator`]: request/response schema validation
//! - [`NonceManager`]: replay protection for signed requests
//! - [`CredentialsProvider`]: storage credentials for publication
//! - [`ServiceContext`]: named capabilities injected into handlers

#![forbid(unsafe_code)]

// === Core Modules ===

/// Validated service name and version identifiers
pub mod identity;

/// Endpoint stability levels
pub mod stability;

/// HTTP verbs accepted by declarations
pub mod method;

/// Route patterns with `:param` placeholders
pub mod route;

/// Declared and compiled value validators
pub mod validator;

/// Authorization scope templates
pub mod scope;

/// Payload schema references
pub mod schema;

/// Error-code tables
pub mod error_code;

/// Pure capability interfaces (no implementations)
pub mod effects;

// === Public API Re-exports ===

pub use error_code::{ErrorCodeTable, ErrorCodeViolation, DEFAULT_ERROR_CODES};
pub use identity::{ApiName, ApiVersion, InvalidIdentifier};
pub use method::{HttpMethod, UnknownMethod};
pub use route::{RouteError, RoutePattern, RouteSegment};
pub use schema::{OutputSchema, SchemaRef};
pub use scope::{ScopeExpression, ScopeShapeViolation, ScopeTemplate};
pub use stability::{Stability, UnknownStability};
pub use validator::{PredicateFn, Validator, ValidatorSpec};

pub use effects::{
    ApiError, ApiHandler, ApiRequest, ApiResponse, CredentialsError, CredentialsProvider,
    EmptyContext, NonceManager, PayloadCleaner, PayloadValidator, PayloadViolation, ReplayedNonce,
    ScopeValidator, ServiceContext, StorageCredentials, StructuralScopeValidator,
};
