//! Portico Service - Surface Composition
//!
//! This crate turns a declared [`ApiSurface`] into a running service. The
//! composer checks that the runtime environment covers everything the
//! surface declared, asks the [`ServiceRuntime`] capability to materialize
//! a routable service, and optionally publishes the machine-readable
//! [`ApiReference`] as a side effect.
//!
//! Composition is fallible and explicit: a missing context capability, a
//! runtime construction failure, or a failed publication all surface as a
//! [`BuildError`] and no service is returned.
//!
//! [`ApiSurface`]: portico_registry::ApiSurface

#![forbid(unsafe_code)]

/// Service composition and the composed service handle
pub mod compose;

/// Composition-time error taxonomy
pub mod errors;

/// Runtime options for composition
pub mod options;

/// Reference publication capability
pub mod publish;

/// Machine-readable reference generation
pub mod reference;

/// Runtime construction capability
pub mod runtime;

// === Public API Re-exports ===

pub use compose::{compose, Service};
pub use errors::BuildError;
pub use options::{RuntimeOptions, DEFAULT_INPUT_LIMIT};
pub use publish::{PublishDestination, PublishError, ReferencePublisher};
pub use reference::{ApiReference, ReferenceEntry, REFERENCE_FORMAT_VERSION};
pub use runtime::{RoutableService, RoutingError, RuntimeConfig, RuntimeError, ServiceRuntime};
