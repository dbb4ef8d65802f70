//! Route Patterns
//!
//! A route is an absolute path whose segments are either literals or named
//! `:param` placeholders, e.g. `/widgets/:widgetId/parts/:partId`. Patterns
//! are parsed once at declaration time; runtimes match requests against the
//! parsed segments and bind placeholder values by name.

use serde::{Deserialize, Serialize};

/// One parsed segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteSegment {
    /// Fixed path segment matched verbatim.
    Literal(String),
    /// Named placeholder matching a single segment, declared as `:name`.
    Param(String),
}

/// Parsed route pattern of a declared endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<RouteSegment>,
}

impl RoutePattern {
    /// Parse a route string into segments.
    ///
    /// The route must start with `/`. Placeholder names consist of ASCII
    /// letters, digits, and underscores. A single trailing slash is
    /// tolerated and ignored.
    pub fn parse(route: &str) -> Result<Self, RouteError> {
        let rest = route.strip_prefix('/').ok_or_else(|| RouteError::MissingLeadingSlash {
            route: route.to_string(),
        })?;

        let mut segments = Vec::new();
        if !rest.is_empty() {
            let mut parts = rest.split('/').peekable();
            while let Some(part) = parts.next() {
                if part.is_empty() {
                    // Tolerate exactly one empty part at the end (trailing slash).
                    if parts.peek().is_none() {
                        break;
                    }
                    return Err(RouteError::EmptySegment {
                        route: route.to_string(),
                    });
                }
                if let Some(name) = part.strip_prefix(':') {
                    if name.is_empty() {
                        return Err(RouteError::EmptyPlaceholder {
                            route: route.to_string(),
                        });
                    }
                    if !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
                        return Err(RouteError::InvalidPlaceholder {
                            route: route.to_string(),
                            placeholder: name.to_string(),
                        });
                    }
                    segments.push(RouteSegment::Param(name.to_string()));
                } else {
                    segments.push(RouteSegment::Literal(part.to_string()));
                }
            }
        }

        Ok(Self {
            raw: route.to_string(),
            segments,
        })
    }

    /// The route exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Parsed segments in path order.
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// Placeholder names in path order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            RouteSegment::Param(name) => Some(name.as_str()),
            RouteSegment::Literal(_) => None,
        })
    }
}

impl std::fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl Serialize for RoutePattern {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for RoutePattern {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        RoutePattern::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a route string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The route does not start with `/`.
    #[error("route {route:?} must start with '/'")]
    MissingLeadingSlash {
        /// The offending route.
        route: String,
    },
    /// The route contains an empty segment, e.g. `/a//b`.
    #[error("route {route:?} contains an empty segment")]
    EmptySegment {
        /// The offending route.
        route: String,
    },
    /// The route contains a bare `:` with no placeholder name.
    #[error("route {route:?} contains a placeholder with no name")]
    EmptyPlaceholder {
        /// The offending route.
        route: String,
    },
    /// A placeholder name contains characters outside `[A-Za-z0-9_]`.
    #[error("route {route:?} placeholder {placeholder:?} contains invalid characters")]
    InvalidPlaceholder {
        /// The offending route.
        route: String,
        /// The offending placeholder name.
        placeholder: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literals_and_placeholders_in_order() {
        let route = RoutePattern::parse("/widgets/:widgetId/parts/:partId").unwrap();
        assert_eq!(
            route.segments(),
            &[
                RouteSegment::Literal("widgets".into()),
                RouteSegment::Param("widgetId".into()),
                RouteSegment::Literal("parts".into()),
                RouteSegment::Param("partId".into()),
            ]
        );
        assert_eq!(
            route.placeholders().collect::<Vec<_>>(),
            vec!["widgetId", "partId"]
        );
    }

    #[test]
    fn parses_root_and_trailing_slash() {
        assert!(RoutePattern::parse("/").unwrap().segments().is_empty());
        let route = RoutePattern::parse("/widgets/").unwrap();
        assert_eq!(route.segments().len(), 1);
        assert_eq!(route.as_str(), "/widgets/");
    }

    #[test]
    fn rejects_missing_leading_slash() {
        assert!(matches!(
            RoutePattern::parse("widgets/:id"),
            Err(RouteError::MissingLeadingSlash { .. })
        ));
    }

    #[test]
    fn rejects_empty_interior_segment() {
        assert!(matches!(
            RoutePattern::parse("/widgets//parts"),
            Err(RouteError::EmptySegment { .. })
        ));
    }

    #[test]
    fn rejects_malformed_placeholders() {
        assert!(matches!(
            RoutePattern::parse("/widgets/:"),
            Err(RouteError::EmptyPlaceholder { .. })
        ));
        assert!(matches!(
            RoutePattern::parse("/widgets/:widget-id"),
            Err(RouteError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn serializes_as_the_declared_string() {
        let route = RoutePattern::parse("/widgets/:id").unwrap();
        assert_eq!(serde_json::to_string(&route).unwrap(), "\"/widgets/:id\"");
        let back: RoutePattern = serde_json::from_str("\"/widgets/:id\"").unwrap();
        assert_eq!(back, route);
    }
}
