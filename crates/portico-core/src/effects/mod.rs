//! Capability Interfaces
//!
//! Pure trait definitions for everything an API surface needs from its host
//! environment. This module defines **what** each capability does; runtime
//! adapters and test doubles define **how**.
//!
//! # Capability Classification
//!
//! ## Declaration-time capabilities (consumed by the registry)
//! - [`ScopeValidator`]: accepts or rejects declared scope templates
//!
//! ## Request-time capabilities (consumed by runtime adapters)
//! - [`ApiHandler`]: endpoint request handling
//! - [`PayloadValidator`]: request/response schema validation
//! - [`NonceManager`]: replay protection for signed requests
//! - [`ServiceContext`]: named capabilities handlers can reach
//!
//! ## Publication-time capabilities (consumed by the composer)
//! - [`CredentialsProvider`]: storage credentials for reference upload
//!
//! All consuming code is parameterized by these traits, so surfaces compose
//! identically against production adapters and deterministic test doubles.

// Capability trait definitions
pub mod context;
pub mod credentials;
pub mod handler;
pub mod nonce;
pub mod payload;
pub mod scopes;

// Re-export all capability types for convenient access
pub use context::{EmptyContext, ServiceContext};
pub use credentials::{CredentialsError, CredentialsProvider, StorageCredentials};
pub use handler::{ApiError, ApiHandler, ApiRequest, ApiResponse, PayloadCleaner};
pub use nonce::{NonceManager, ReplayedNonce};
pub use payload::{PayloadValidator, PayloadViolation};
pub use scopes::{ScopeValidator, StructuralScopeValidator};
