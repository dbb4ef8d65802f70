//! Error-Code Tables
//!
//! Handlers report failures by code identifier rather than raw HTTP status;
//! the surface's error-code table maps each identifier to the status the
//! runtime responds with. Every surface starts from the built-in table and
//! may add codes or override the status of existing ones.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in error codes shared by every surface, in documentation order.
pub const DEFAULT_ERROR_CODES: &[(&str, u16)] = &[
    ("MalformedPayload", 400),
    ("InvalidRequestArguments", 400),
    ("InputValidationError", 400),
    ("InputTooLarge", 413),
    ("InsufficientScopes", 403),
    ("ResourceNotFound", 404),
    ("RequestConflict", 409),
    ("ResourceExpired", 410),
    ("InternalServerError", 500),
];

static CODE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new("^[A-Z][A-Za-z0-9]*$").expect("code pattern is valid")
});

/// Mapping from error-code identifier to HTTP status.
///
/// Iteration order is the built-in order followed by user-added codes in
/// insertion order; overriding a built-in code keeps its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCodeTable {
    codes: IndexMap<String, u16>,
}

impl ErrorCodeTable {
    /// The built-in table with no user additions.
    pub fn builtin() -> Self {
        Self {
            codes: DEFAULT_ERROR_CODES
                .iter()
                .map(|&(code, status)| (code.to_string(), status))
                .collect(),
        }
    }

    /// Merge user-declared codes over the built-in table, validating every
    /// resulting pair.
    ///
    /// Identifiers must be UpperCamelCase ASCII and statuses valid HTTP
    /// status codes.
    pub fn merged(overrides: &IndexMap<String, u16>) -> Result<Self, ErrorCodeViolation> {
        let mut table = Self::builtin();
        for (code, &status) in overrides {
            table.codes.insert(code.clone(), status);
        }
        for (code, &status) in &table.codes {
            if !CODE_PATTERN.is_match(code) {
                return Err(ErrorCodeViolation::InvalidCode { code: code.clone() });
            }
            if !(100..=599).contains(&status) {
                return Err(ErrorCodeViolation::InvalidStatus {
                    code: code.clone(),
                    status,
                });
            }
        }
        Ok(table)
    }

    /// The HTTP status for `code`, if declared.
    pub fn status_for(&self, code: &str) -> Option<u16> {
        self.codes.get(code).copied()
    }

    /// Whether `code` is declared.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(code)
    }

    /// All `(code, status)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.codes.iter().map(|(code, &status)| (code.as_str(), status))
    }

    /// Number of declared codes.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the table is empty. Never true for merged tables, which
    /// always contain the built-ins.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for ErrorCodeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Defect found while merging an error-code table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorCodeViolation {
    /// An identifier is not UpperCamelCase ASCII.
    #[error("error code {code:?} must match ^[A-Z][A-Za-z0-9]*$")]
    InvalidCode {
        /// The offending identifier.
        code: String,
    },
    /// A status is outside the valid HTTP range.
    #[error("error code {code:?} maps to {status}, which is not an HTTP status code")]
    InvalidStatus {
        /// The identifier carrying the bad status.
        code: String,
        /// The offending status.
        status: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_matches_the_documented_defaults() {
        let table = ErrorCodeTable::builtin();
        assert_eq!(table.len(), DEFAULT_ERROR_CODES.len());
        assert_eq!(table.status_for("MalformedPayload"), Some(400));
        assert_eq!(table.status_for("InputTooLarge"), Some(413));
        assert_eq!(table.status_for("InsufficientScopes"), Some(403));
        assert_eq!(table.status_for("InternalServerError"), Some(500));
        assert_eq!(table.status_for("NoSuchCode"), None);
    }

    #[test]
    fn merged_table_adds_codes_after_the_builtins() {
        let mut overrides = IndexMap::new();
        overrides.insert("WidgetQuotaExceeded".to_string(), 402_u16);
        let table = ErrorCodeTable::merged(&overrides).unwrap();
        assert_eq!(table.status_for("WidgetQuotaExceeded"), Some(402));
        let last = table.iter().last().unwrap();
        assert_eq!(last, ("WidgetQuotaExceeded", 402));
    }

    #[test]
    fn overriding_a_builtin_keeps_its_position() {
        let mut overrides = IndexMap::new();
        overrides.insert("ResourceNotFound".to_string(), 400_u16);
        let table = ErrorCodeTable::merged(&overrides).unwrap();
        assert_eq!(table.status_for("ResourceNotFound"), Some(400));
        assert_eq!(table.len(), DEFAULT_ERROR_CODES.len());
        let position = table.iter().position(|(code, _)| code == "ResourceNotFound");
        assert_eq!(position, Some(5));
    }

    #[test]
    fn lowercase_identifiers_are_rejected() {
        let mut overrides = IndexMap::new();
        overrides.insert("notCamelCase".to_string(), 400_u16);
        assert_eq!(
            ErrorCodeTable::merged(&overrides),
            Err(ErrorCodeViolation::InvalidCode {
                code: "notCamelCase".to_string()
            })
        );
    }

    #[test]
    fn out_of_range_statuses_are_rejected() {
        let mut overrides = IndexMap::new();
        overrides.insert("TeapotOverflow".to_string(), 99_u16);
        assert!(matches!(
            ErrorCodeTable::merged(&overrides),
            Err(ErrorCodeViolation::InvalidStatus { status: 99, .. })
        ));
        overrides.insert("TeapotOverflow".to_string(), 600_u16);
        assert!(matches!(
            ErrorCodeTable::merged(&overrides),
            Err(ErrorCodeViolation::InvalidStatus { status: 600, .. })
        ));
    }
}
