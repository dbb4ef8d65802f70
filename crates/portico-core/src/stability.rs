//! Endpoint Stability Levels
//!
//! Stability levels tell API consumers which endpoints they can rely on and
//! which may change or disappear. The set is closed on purpose: reference
//! documents and generated clients match exhaustively over it, so admitting a
//! new level is a breaking change for that tooling.

use serde::{Deserialize, Serialize};

/// Stability level attached to a declared endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stability {
    /// Retained for existing callers; documentation should point at the
    /// replacement.
    Deprecated,
    /// No compatibility guarantee. The default when a declaration omits
    /// stability.
    #[default]
    Experimental,
    /// Evolves without breaking existing callers.
    Stable,
}

impl Stability {
    /// Every level, in documentation order.
    pub const ALL: [Stability; 3] = [
        Stability::Deprecated,
        Stability::Experimental,
        Stability::Stable,
    ];

    /// String form used in references and diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stability::Deprecated => "deprecated",
            Stability::Experimental => "experimental",
            Stability::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Stability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing a string that is not a stability level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stability level {0:?}, expected one of: deprecated, experimental, stable")]
pub struct UnknownStability(pub String);

impl std::str::FromStr for Stability {
    type Err = UnknownStability;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "deprecated" => Ok(Stability::Deprecated),
            "experimental" => Ok(Stability::Experimental),
            "stable" => Ok(Stability::Stable),
            other => Err(UnknownStability(other.to_string())),
        }
    }
}
