//! Portico Registry - Surface Declaration
//!
//! This crate turns author-written declarations into a validated, ordered
//! API surface. [`ApiBuilder`] owns the surface-wide options and an
//! [`EntryRegistry`] of accepted endpoint declarations; the service crate
//! consumes the resulting [`ApiSurface`] snapshot.
//!
//! Validation is front-loaded: builder options are checked when the builder
//! is constructed, each declaration is checked in full when it is declared,
//! and a declaration that fails any check leaves the registry untouched.
//! Nothing after construction time can make a surface invalid.

#![forbid(unsafe_code)]

/// Builder facade owning options and registry
pub mod builder;

/// Endpoint declarations and accepted entries
pub mod entry;

/// Configuration and declaration errors
pub mod errors;

/// Builder options and normalization
pub mod options;

/// Ordered registry with declaration-time validation
pub mod registry;

/// Read-only surface snapshot for composition
pub mod surface;

// === Public API Re-exports ===

pub use builder::ApiBuilder;
pub use entry::{DeclareOptions, Entry};
pub use errors::{ConfigurationError, DeclarationError};
pub use options::{BuilderConfig, BuilderOptions};
pub use registry::EntryRegistry;
pub use surface::ApiSurface;
