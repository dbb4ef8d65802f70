//! Portico Testing Infrastructure
//!
//! Deterministic test doubles for every capability seam, plus factories
//! for the fixtures surface tests keep constructing. The in-memory
//! [`MockRuntime`] routes requests exactly the way a production adapter
//! would: segment matching, declared validators, error-code mapping, then
//! the handler.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! portico-testkit = { path = "../portico-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use portico_testkit::*;
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let mut builder = widget_builder();
//! builder.declare(declare_get_widget(), ok_handler(200)).unwrap();
//! let runtime = Arc::new(MockRuntime::new());
//! // ... compose and drive requests
//! # }
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod factories;
pub mod mocks;

// Re-export commonly used items
pub use factories::*;
pub use mocks::*;

// Re-export commonly used external types for convenience
pub use portico_core::effects::handler::{ApiError, ApiRequest, ApiResponse};
pub use portico_registry::{ApiBuilder, BuilderOptions, DeclareOptions};
pub use portico_service::{compose, RuntimeOptions, Service};
