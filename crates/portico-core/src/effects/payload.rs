//! Payload Validation Capability
//!
//! Resolves schema references to actual schemas and validates payloads
//! against them. The declaration vocabulary never interprets schema
//! contents, so surfaces work with any schema language the deployment
//! provides.

use serde_json::Value;

use crate::schema::SchemaRef;

/// Request/response payload validation against referenced schemas.
pub trait PayloadValidator: Send + Sync {
    /// Validate `payload` against the schema `reference` resolves to.
    fn validate(&self, reference: &SchemaRef, payload: &Value) -> Result<(), PayloadViolation>;
}

/// Violation reported by a payload validator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("payload does not satisfy {schema}: {detail}")]
pub struct PayloadViolation {
    /// The schema the payload failed against.
    pub schema: SchemaRef,
    /// Validator-specific description of the mismatch.
    pub detail: String,
}

impl PayloadViolation {
    /// Build a violation for `schema`.
    pub fn new(schema: impl Into<SchemaRef>, detail: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RequireObject;

    impl PayloadValidator for RequireObject {
        fn validate(&self, reference: &SchemaRef, payload: &Value) -> Result<(), PayloadViolation> {
            if payload.is_object() {
                Ok(())
            } else {
                Err(PayloadViolation::new(reference.clone(), "expected an object"))
            }
        }
    }

    #[test]
    fn validator_reports_schema_and_detail() {
        let reference = SchemaRef::new("v1/widget.json");
        assert!(RequireObject
            .validate(&reference, &serde_json::json!({}))
            .is_ok());
        let violation = RequireObject
            .validate(&reference, &serde_json::json!([1, 2]))
            .unwrap_err();
        assert_eq!(violation.schema.as_str(), "v1/widget.json");
        assert_eq!(violation.detail, "expected an object");
    }
}
