//! Authorization Scope Templates
//!
//! A scope template describes which caller scope sets satisfy an endpoint.
//! Deciding satisfaction at request time belongs to the external scope
//! engine; this module only carries the declared shape and checks that it is
//! structurally well formed.
//!
//! Two forms exist. The disjunctive-normal-form shorthand is a list of
//! alternatives, each alternative a list of scopes that must all be present.
//! The expression form nests `AnyOf` / `AllOf` combinators and conditional
//! requirements keyed on request properties.

use serde::{Deserialize, Serialize};

/// Declared authorization requirement of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeTemplate {
    /// Disjunctive normal form: OR across the outer list, AND within each
    /// inner list. `[["a", "b"], ["c"]]` is satisfied by `{a, b}` or `{c}`.
    Dnf(Vec<Vec<String>>),
    /// Nested combinator expression.
    Expression(ScopeExpression),
}

/// Node of an expression-form scope template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScopeExpression {
    /// A single required scope.
    Scope(String),
    /// Satisfied when any branch is satisfied.
    AnyOf {
        /// The alternative branches.
        #[serde(rename = "AnyOf")]
        any_of: Vec<ScopeExpression>,
    },
    /// Satisfied when every branch is satisfied.
    AllOf {
        /// The required branches.
        #[serde(rename = "AllOf")]
        all_of: Vec<ScopeExpression>,
    },
    /// Required only when the named request property is truthy.
    If {
        /// Request property the requirement is keyed on.
        #[serde(rename = "if")]
        condition: String,
        /// Requirement applied when the condition holds.
        #[serde(rename = "then")]
        then: Box<ScopeExpression>,
    },
}

impl ScopeTemplate {
    /// Build a DNF template from any nested iterable of scope strings.
    pub fn dnf<G, A, S>(groups: G) -> Self
    where
        G: IntoIterator<Item = A>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScopeTemplate::Dnf(
            groups
                .into_iter()
                .map(|group| group.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// Check that the template is structurally well formed.
    ///
    /// Scope strings must be non-empty and free of control characters, and
    /// conditional requirements must name a property. Empty `AnyOf` /
    /// `AllOf` lists are legal; their meaning is the scope engine's concern.
    pub fn check_shape(&self) -> Result<(), ScopeShapeViolation> {
        match self {
            ScopeTemplate::Dnf(groups) => {
                for group in groups {
                    for scope in group {
                        check_scope_string(scope)?;
                    }
                }
                Ok(())
            }
            ScopeTemplate::Expression(expression) => expression.check_shape(),
        }
    }
}

impl ScopeExpression {
    /// Build an `AnyOf` node.
    pub fn any_of(branches: impl IntoIterator<Item = ScopeExpression>) -> Self {
        ScopeExpression::AnyOf {
            any_of: branches.into_iter().collect(),
        }
    }

    /// Build an `AllOf` node.
    pub fn all_of(branches: impl IntoIterator<Item = ScopeExpression>) -> Self {
        ScopeExpression::AllOf {
            all_of: branches.into_iter().collect(),
        }
    }

    /// Build a conditional requirement.
    pub fn if_then(condition: impl Into<String>, then: ScopeExpression) -> Self {
        ScopeExpression::If {
            condition: condition.into(),
            then: Box::new(then),
        }
    }

    /// Build a single-scope leaf.
    pub fn scope(scope: impl Into<String>) -> Self {
        ScopeExpression::Scope(scope.into())
    }

    fn check_shape(&self) -> Result<(), ScopeShapeViolation> {
        match self {
            ScopeExpression::Scope(scope) => check_scope_string(scope),
            ScopeExpression::AnyOf { any_of } => {
                any_of.iter().try_for_each(ScopeExpression::check_shape)
            }
            ScopeExpression::AllOf { all_of } => {
                all_of.iter().try_for_each(ScopeExpression::check_shape)
            }
            ScopeExpression::If { condition, then } => {
                if condition.is_empty() {
                    return Err(ScopeShapeViolation::EmptyCondition);
                }
                then.check_shape()
            }
        }
    }
}

fn check_scope_string(scope: &str) -> Result<(), ScopeShapeViolation> {
    if scope.is_empty() {
        return Err(ScopeShapeViolation::EmptyScope);
    }
    if scope.chars().any(char::is_control) {
        return Err(ScopeShapeViolation::ControlCharacter {
            scope: scope.to_string(),
        });
    }
    Ok(())
}

/// Structural defect found in a scope template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeShapeViolation {
    /// A scope string is empty.
    #[error("scope template contains an empty scope string")]
    EmptyScope,
    /// A scope string contains a control character.
    #[error("scope {scope:?} contains a control character")]
    ControlCharacter {
        /// The offending scope string.
        scope: String,
    },
    /// A conditional requirement has an empty condition.
    #[error("conditional scope requirement has an empty condition")]
    EmptyCondition,
}
