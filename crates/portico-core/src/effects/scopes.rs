//! Scope-Template Validation Capability
//!
//! The registry consults this capability before accepting a declaration
//! that carries scopes. Satisfaction checking at request time belongs to
//! the external scope engine; here the only question is whether a declared
//! template is acceptable at all.

use crate::scope::ScopeTemplate;

/// Declaration-time acceptance check for scope templates.
pub trait ScopeValidator: Send + Sync {
    /// Whether `template` is acceptable for a new declaration.
    fn validate(&self, template: &ScopeTemplate) -> bool;
}

/// Shipped validator accepting any structurally well-formed template.
///
/// Deployments with richer rules (registered scope prefixes, forbidden
/// wildcards) supply their own implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuralScopeValidator;

impl ScopeValidator for StructuralScopeValidator {
    fn validate(&self, template: &ScopeTemplate) -> bool {
        template.check_shape().is_ok()
    }
}
