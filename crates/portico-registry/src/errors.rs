//! Declaration-Time Error Taxonomy
//!
//! Two failure domains exist before a surface ever serves a request:
//! unusable builder options ([`ConfigurationError`]) and rejected endpoint
//! declarations ([`DeclarationError`]). Both are terminal for the operation
//! that raised them; neither leaves partial state behind.

use portico_core::error_code::ErrorCodeViolation;
use portico_core::route::RouteError;
use portico_core::scope::ScopeTemplate;

/// Builder construction failure: the surface-wide options are unusable.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigurationError {
    /// A legacy option was supplied.
    #[error("option {option:?} is no longer supported: {hint}")]
    UnsupportedOption {
        /// Name of the rejected option.
        option: &'static str,
        /// What to do instead.
        hint: &'static str,
    },
    /// A required option is missing or empty.
    #[error("required option {field:?} is missing or empty")]
    MissingField {
        /// Name of the missing option.
        field: &'static str,
    },
    /// The service name does not match the required pattern.
    #[error("service name {name:?} must match ^[a-z][a-z0-9_-]*$")]
    InvalidName {
        /// The offending name.
        name: String,
    },
    /// The version does not match the required pattern.
    #[error("version {version:?} must match ^v[0-9]+$")]
    InvalidVersion {
        /// The offending version.
        version: String,
    },
    /// An error-code identifier is malformed.
    #[error("error code {code:?} must match ^[A-Z][A-Za-z0-9]*$")]
    InvalidErrorCode {
        /// The offending identifier.
        code: String,
    },
    /// An error code maps to a status outside the HTTP range.
    #[error("error code {code:?} maps to {status}, which is not an HTTP status code")]
    InvalidStatusCode {
        /// The identifier carrying the bad status.
        code: String,
        /// The offending status.
        status: u16,
    },
    /// A surface-wide fallback validator has a malformed pattern.
    #[error("fallback validator for parameter {param:?} has an invalid pattern")]
    InvalidParamPattern {
        /// The parameter whose pattern failed to compile.
        param: String,
        /// The compile failure.
        #[source]
        source: regex::Error,
    },
}

impl From<ErrorCodeViolation> for ConfigurationError {
    fn from(violation: ErrorCodeViolation) -> Self {
        match violation {
            ErrorCodeViolation::InvalidCode { code } => ConfigurationError::InvalidErrorCode { code },
            ErrorCodeViolation::InvalidStatus { code, status } => {
                ConfigurationError::InvalidStatusCode { code, status }
            }
        }
    }
}

/// Declaration failure: the endpoint was rejected and not registered.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DeclarationError {
    /// A required declaration field is missing or empty.
    #[error("required field {field:?} is missing or empty")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// The route string failed to parse.
    #[error(transparent)]
    InvalidRoute(#[from] RouteError),
    /// A per-entry parameter validator has a malformed pattern.
    #[error("validator for parameter {param:?} has an invalid pattern")]
    InvalidParamPattern {
        /// The parameter whose pattern failed to compile.
        param: String,
        /// The compile failure.
        #[source]
        source: regex::Error,
    },
    /// A query validator has a malformed pattern.
    #[error("validator for query key {key:?} has an invalid pattern")]
    InvalidQueryPattern {
        /// The query key whose pattern failed to compile.
        key: String,
        /// The compile failure.
        #[source]
        source: regex::Error,
    },
    /// The legacy deferred-authorization flag was set.
    #[error("deferred authorization is no longer supported; declare explicit scope templates instead")]
    DeferredAuthUnsupported,
    /// The scope validator refused the declared template.
    #[error("scope template was rejected by the scope validator: {template:?}")]
    InvalidScopes {
        /// The rejected template.
        template: ScopeTemplate,
    },
    /// Another entry already claims the same method and route.
    #[error("an entry for {method} {route:?} is already declared")]
    DuplicateRoute {
        /// Method of the conflicting declaration.
        method: portico_core::method::HttpMethod,
        /// Route of the conflicting declaration.
        route: String,
    },
    /// Another entry already uses the same name.
    #[error("an entry named {name:?} is already declared")]
    DuplicateName {
        /// The conflicting name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_violations_map_onto_configuration_errors() {
        let violation = ErrorCodeViolation::InvalidCode {
            code: "bad".to_string(),
        };
        assert!(matches!(
            ConfigurationError::from(violation),
            ConfigurationError::InvalidErrorCode { code } if code == "bad"
        ));

        let violation = ErrorCodeViolation::InvalidStatus {
            code: "Teapot".to_string(),
            status: 99,
        };
        assert!(matches!(
            ConfigurationError::from(violation),
            ConfigurationError::InvalidStatusCode { status: 99, .. }
        ));
    }

    #[test]
    fn messages_name_the_offending_input() {
        let error = DeclarationError::DuplicateName {
            name: "createWidget".to_string(),
        };
        assert!(error.to_string().contains("createWidget"));

        let error = ConfigurationError::InvalidVersion {
            version: "1".to_string(),
        };
        assert!(error.to_string().contains("^v[0-9]+$"));
    }
}
