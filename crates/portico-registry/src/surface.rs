//! API Surface Snapshot
//!
//! An [`ApiSurface`] is the read-only view of a builder handed to the
//! service composer: surface-wide configuration plus every accepted entry
//! in declaration order. Snapshots are cheap to clone and safe to share
//! across tasks; later declarations on the builder never show up in a
//! snapshot taken earlier.

use indexmap::IndexMap;

use portico_core::error_code::ErrorCodeTable;
use portico_core::identity::{ApiName, ApiVersion};
use portico_core::validator::Validator;

use crate::entry::Entry;

/// Everything a runtime needs to route, validate, and document a surface.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ApiSurface {
    /// Service name.
    pub name: ApiName,
    /// Surface version.
    pub version: ApiVersion,
    /// Documentation title.
    pub title: String,
    /// Documentation description.
    pub description: String,
    /// Surface-wide fallback parameter validators.
    pub params: IndexMap<String, Validator>,
    /// Context capability names handlers expect.
    pub context: Vec<String>,
    /// Error-code table.
    pub error_codes: ErrorCodeTable,
    /// Accepted entries in declaration order.
    pub entries: Vec<Entry>,
}

impl ApiSurface {
    /// Look up an entry by its unique name.
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// The HTTP status for an error code, if declared.
    pub fn status_for(&self, code: &str) -> Option<u16> {
        self.error_codes.status_for(code)
    }
}
