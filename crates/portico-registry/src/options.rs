//! Builder Options and Normalization
//!
//! [`BuilderOptions`] is what a service author writes; [`BuilderConfig`] is
//! what the rest of the crate runs on. [`normalize`] is the only path from
//! one to the other: it applies defaults, validates every field, and
//! compiles declared patterns, so downstream code never re-checks options.

use indexmap::IndexMap;

use portico_core::error_code::ErrorCodeTable;
use portico_core::identity::{ApiName, ApiVersion};
use portico_core::validator::{Validator, ValidatorSpec};

use crate::errors::ConfigurationError;

/// Surface-wide options, as written by the service author.
#[derive(Debug, Clone, Default)]
pub struct BuilderOptions {
    /// Service name, e.g. `"queue"`. Must match `^[a-z][a-z0-9_-]*$`.
    pub name: String,
    /// Surface version, e.g. `"v1"`. Must match `^v[0-9]+$`.
    pub version: String,
    /// Human-readable title for documentation.
    pub title: String,
    /// Human-readable description for documentation.
    pub description: String,
    /// Fallback parameter validators shared by every entry, keyed by
    /// placeholder name.
    pub params: IndexMap<String, ValidatorSpec>,
    /// Names of context capabilities handlers expect at composition time.
    pub context: Vec<String>,
    /// Additional error codes merged over the built-in table.
    pub error_codes: IndexMap<String, u16>,
    /// Legacy option. Constructing a builder with `Some` here is rejected;
    /// schema references are now written in full.
    pub schema_prefix: Option<String>,
}

impl BuilderOptions {
    /// Options with the four required fields set and everything else empty.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Add a surface-wide fallback validator for a route parameter.
    pub fn with_param(mut self, name: impl Into<String>, spec: ValidatorSpec) -> Self {
        self.params.insert(name.into(), spec);
        self
    }

    /// Declare a context capability handlers expect.
    pub fn with_context(mut self, capability: impl Into<String>) -> Self {
        self.context.push(capability.into());
        self
    }

    /// Add or override an error code.
    pub fn with_error_code(mut self, code: impl Into<String>, status: u16) -> Self {
        self.error_codes.insert(code.into(), status);
        self
    }
}

/// Fully validated and defaulted surface-wide state.
#[derive(Debug, Clone)]
pub struct BuilderConfig {
    /// Validated service name.
    pub name: ApiName,
    /// Validated surface version.
    pub version: ApiVersion,
    /// Documentation title.
    pub title: String,
    /// Documentation description.
    pub description: String,
    /// Compiled fallback parameter validators.
    pub params: IndexMap<String, Validator>,
    /// Declared context capability names.
    pub context: Vec<String>,
    /// Merged and validated error-code table.
    pub error_codes: ErrorCodeTable,
}

/// Validate `options` and produce the normalized configuration.
///
/// Checks run in a fixed order: legacy options, required fields, name and
/// version patterns, error-code merge, fallback-pattern compilation. The
/// first failure wins.
pub fn normalize(options: BuilderOptions) -> Result<BuilderConfig, ConfigurationError> {
    if options.schema_prefix.is_some() {
        return Err(ConfigurationError::UnsupportedOption {
            option: "schema_prefix",
            hint: "write schema references in full",
        });
    }

    require(&options.title, "title")?;
    require(&options.description, "description")?;
    require(&options.name, "name")?;
    require(&options.version, "version")?;

    let name = ApiName::parse(&options.name).map_err(|_| ConfigurationError::InvalidName {
        name: options.name.clone(),
    })?;
    let version =
        ApiVersion::parse(&options.version).map_err(|_| ConfigurationError::InvalidVersion {
            version: options.version.clone(),
        })?;

    let error_codes = ErrorCodeTable::merged(&options.error_codes)?;

    let mut params = IndexMap::with_capacity(options.params.len());
    for (param, spec) in &options.params {
        let validator = spec
            .compile()
            .map_err(|source| ConfigurationError::InvalidParamPattern {
                param: param.clone(),
                source,
            })?;
        params.insert(param.clone(), validator);
    }

    Ok(BuilderConfig {
        name,
        version,
        title: options.title,
        description: options.description,
        params,
        context: options.context,
        error_codes,
    })
}

fn require(value: &str, field: &'static str) -> Result<(), ConfigurationError> {
    if value.is_empty() {
        Err(ConfigurationError::MissingField { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> BuilderOptions {
        BuilderOptions::new("widgets", "v1", "Widget Service", "Manages widgets.")
    }

    #[test]
    fn minimal_options_normalize() {
        let config = normalize(minimal()).unwrap();
        assert_eq!(config.name.as_str(), "widgets");
        assert_eq!(config.version.as_str(), "v1");
        assert!(config.params.is_empty());
        assert!(config.context.is_empty());
        // Absent error codes default to the built-in table.
        assert_eq!(config.error_codes.status_for("ResourceNotFound"), Some(404));
    }

    #[test]
    fn schema_prefix_is_rejected_before_anything_else() {
        let options = BuilderOptions {
            schema_prefix: Some("https://schemas.example.com/".to_string()),
            ..BuilderOptions::default()
        };
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::UnsupportedOption {
                option: "schema_prefix",
                ..
            })
        ));
    }

    #[test]
    fn missing_required_fields_are_named() {
        let mut options = minimal();
        options.title = String::new();
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::MissingField { field: "title" })
        ));

        let mut options = minimal();
        options.description = String::new();
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::MissingField {
                field: "description"
            })
        ));
    }

    #[test]
    fn malformed_name_and_version_are_rejected() {
        let mut options = minimal();
        options.name = "Widget Service".to_string();
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::InvalidName { .. })
        ));

        let mut options = minimal();
        options.version = "1.0".to_string();
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn declared_error_codes_are_validated() {
        let options = minimal().with_error_code("lowercase", 400);
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::InvalidErrorCode { .. })
        ));

        let options = minimal().with_error_code("TooBig", 9000);
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::InvalidStatusCode { status: 9000, .. })
        ));
    }

    #[test]
    fn fallback_patterns_are_compiled_eagerly() {
        let options = minimal().with_param("widgetId", ValidatorSpec::pattern("^[a-z]+$"));
        let config = normalize(options).unwrap();
        assert!(config.params.get("widgetId").unwrap().check("abc").is_ok());

        let options = minimal().with_param("widgetId", ValidatorSpec::pattern("([a-z"));
        assert!(matches!(
            normalize(options),
            Err(ConfigurationError::InvalidParamPattern { param, .. }) if param == "widgetId"
        ));
    }
}
