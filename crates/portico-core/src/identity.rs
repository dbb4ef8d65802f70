//! Service Name and Version Identifiers
//!
//! Names and versions end up in URL paths, reference documents, and bucket
//! keys, so both are validated once at the boundary and carried as opaque
//! newtypes everywhere else.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new("^[a-z][a-z0-9_-]*$").expect("name pattern is valid")
});

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new("^v[0-9]+$").expect("version pattern is valid")
});

/// Identifier rejected by [`ApiName::parse`] or [`ApiVersion::parse`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} {value:?} does not match {pattern}")]
pub struct InvalidIdentifier {
    /// Which identifier was rejected, for diagnostics.
    kind: &'static str,
    /// The offending input.
    value: String,
    /// The pattern the input must match.
    pattern: &'static str,
}

impl InvalidIdentifier {
    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Lowercase service name, e.g. `"queue"` or `"worker_manager"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct ApiName(String);

impl ApiName {
    /// Parse and validate a service name.
    pub fn parse(name: &str) -> Result<Self, InvalidIdentifier> {
        if NAME_PATTERN.is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(InvalidIdentifier {
                kind: "service name",
                value: name.to_string(),
                pattern: "^[a-z][a-z0-9_-]*$",
            })
        }
    }

    /// The validated name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApiName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ApiName {
    type Error = InvalidIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ApiName> for String {
    fn from(name: ApiName) -> Self {
        name.0
    }
}

/// Surface version of the form `v<integer>`, e.g. `"v1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(into = "String")]
pub struct ApiVersion(String);

impl ApiVersion {
    /// Parse and validate a surface version.
    pub fn parse(version: &str) -> Result<Self, InvalidIdentifier> {
        if VERSION_PATTERN.is_match(version) {
            Ok(Self(version.to_string()))
        } else {
            Err(InvalidIdentifier {
                kind: "version",
                value: version.to_string(),
                pattern: "^v[0-9]+$",
            })
        }
    }

    /// The validated version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = InvalidIdentifier;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ApiVersion> for String {
    fn from(version: ApiVersion) -> Self {
        version.0
    }
}
