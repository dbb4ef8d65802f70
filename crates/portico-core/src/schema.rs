//! Payload Schema References
//!
//! Declarations reference request and response schemas by identifier; the
//! payload validator capability resolves identifiers to actual schemas. That
//! keeps the registry independent of any particular schema language.

use serde::{Deserialize, Serialize};

/// Opaque reference to a payload schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaRef(String);

impl SchemaRef {
    /// Wrap a schema identifier.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SchemaRef {
    fn from(reference: &str) -> Self {
        Self(reference.to_string())
    }
}

impl From<String> for SchemaRef {
    fn from(reference: String) -> Self {
        Self(reference)
    }
}

/// Declared response payload of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OutputSchema {
    /// JSON response validated against the referenced schema.
    Schema(SchemaRef),
    /// Raw byte stream; the runtime passes the body through unvalidated.
    Blob,
}

impl OutputSchema {
    /// Declare a schema-validated response.
    pub fn schema(reference: impl Into<SchemaRef>) -> Self {
        OutputSchema::Schema(reference.into())
    }

    /// The schema reference, when the output is not a blob.
    pub fn as_schema(&self) -> Option<&SchemaRef> {
        match self {
            OutputSchema::Schema(reference) => Some(reference),
            OutputSchema::Blob => None,
        }
    }
}

// Serialized as the schema identifier, with "blob" reserved as the marker
// for raw output. Reference documents depend on this representation.
impl Serialize for OutputSchema {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OutputSchema::Schema(reference) => serializer.serialize_str(reference.as_str()),
            OutputSchema::Blob => serializer.serialize_str("blob"),
        }
    }
}

impl<'de> Deserialize<'de> for OutputSchema {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "blob" {
            Ok(OutputSchema::Blob)
        } else {
            Ok(OutputSchema::Schema(SchemaRef::new(raw)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_refs_serialize_transparently() {
        let reference = SchemaRef::new("v1/create-widget-request.json");
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, "\"v1/create-widget-request.json\"");
    }

    #[test]
    fn blob_marker_round_trips() {
        let json = serde_json::to_string(&OutputSchema::Blob).unwrap();
        assert_eq!(json, "\"blob\"");
        let back: OutputSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OutputSchema::Blob);
    }

    #[test]
    fn schema_output_round_trips() {
        let output = OutputSchema::schema("v1/widget.json");
        let json = serde_json::to_string(&output).unwrap();
        let back: OutputSchema = serde_json::from_str(&json).unwrap();
        assert_eq!(back, output);
        assert_eq!(back.as_schema().map(SchemaRef::as_str), Some("v1/widget.json"));
    }
}
