//! HTTP Verbs
//!
//! The verbs an endpoint declaration may use. Closed set: routing tables and
//! reference tooling match exhaustively over it.

use serde::{Deserialize, Serialize};

/// HTTP verb of a declared endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// Safe retrieval.
    Get,
    /// Headers only.
    Head,
    /// Creation or invocation.
    Post,
    /// Idempotent creation or replacement.
    Put,
    /// Removal.
    Delete,
    /// Partial update.
    Patch,
    /// Capability discovery and CORS preflight.
    Options,
}

impl HttpMethod {
    /// Every verb, in declaration-table order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
    ];

    /// Canonical uppercase form, e.g. `"GET"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Whether requests with this verb carry a body the runtime validates
    /// against a declared input schema.
    pub fn has_request_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing a string that is not a supported verb.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported HTTP method {0:?}")]
pub struct UnknownMethod(pub String);

impl std::str::FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn canonical_forms_round_trip() {
        for method in HttpMethod::ALL {
            assert_eq!(HttpMethod::from_str(method.as_str()), Ok(method));
        }
    }

    #[test]
    fn parsing_ignores_ascii_case() {
        assert_eq!(HttpMethod::from_str("get"), Ok(HttpMethod::Get));
        assert_eq!(HttpMethod::from_str("Patch"), Ok(HttpMethod::Patch));
    }

    #[test]
    fn unsupported_methods_are_rejected() {
        for input in ["TRACE", "CONNECT", "", "FETCH"] {
            assert!(HttpMethod::from_str(input).is_err());
        }
    }

    #[test]
    fn body_carrying_verbs() {
        assert!(HttpMethod::Post.has_request_body());
        assert!(HttpMethod::Put.has_request_body());
        assert!(HttpMethod::Patch.has_request_body());
        assert!(!HttpMethod::Get.has_request_body());
        assert!(!HttpMethod::Head.has_request_body());
    }
}
