//! Value Validators
//!
//! Route parameters and query keys are validated against author-declared
//! checks. A check is either a regular-expression pattern or an arbitrary
//! predicate. Declarations carry a [`ValidatorSpec`]; the registry compiles
//! specs into [`Validator`]s when a declaration is accepted, so a malformed
//! pattern is rejected at declaration time rather than on the first request.

use std::sync::Arc;

use regex::Regex;

/// Predicate form of a validator.
///
/// Returns `None` when the value is acceptable, or `Some(message)` with a
/// human-readable rejection reason.
pub type PredicateFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// A declared validator, as written by the service author.
#[derive(Clone)]
pub enum ValidatorSpec {
    /// Regular-expression pattern, compiled at declaration time.
    ///
    /// Matching uses `Regex::is_match`, so unanchored patterns match
    /// anywhere in the value. Anchor with `^`/`$` to constrain the whole
    /// value.
    Pattern(String),
    /// Custom predicate.
    Predicate(PredicateFn),
}

impl ValidatorSpec {
    /// Declare a regular-expression validator.
    pub fn pattern(pattern: impl Into<String>) -> Self {
        ValidatorSpec::Pattern(pattern.into())
    }

    /// Declare a predicate validator.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        ValidatorSpec::Predicate(Arc::new(predicate))
    }

    /// Compile the spec into a runnable validator.
    pub fn compile(&self) -> Result<Validator, regex::Error> {
        match self {
            ValidatorSpec::Pattern(pattern) => Ok(Validator::Pattern(Regex::new(pattern)?)),
            ValidatorSpec::Predicate(predicate) => Ok(Validator::Predicate(predicate.clone())),
        }
    }
}

impl std::fmt::Debug for ValidatorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidatorSpec::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
            ValidatorSpec::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A compiled validator held by an accepted declaration.
#[derive(Clone)]
pub enum Validator {
    /// Compiled regular expression.
    Pattern(Regex),
    /// Custom predicate.
    Predicate(PredicateFn),
}

impl Validator {
    /// Check a single value.
    ///
    /// `Err` carries the rejection message surfaced in request diagnostics.
    pub fn check(&self, value: &str) -> Result<(), String> {
        match self {
            Validator::Pattern(regex) => {
                if regex.is_match(value) {
                    Ok(())
                } else {
                    Err(format!(
                        "value {value:?} does not match pattern {:?}",
                        regex.as_str()
                    ))
                }
            }
            Validator::Predicate(predicate) => match predicate(value) {
                None => Ok(()),
                Some(message) => Err(message),
            },
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Validator::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Validator::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_validator_checks_values() {
        let validator = ValidatorSpec::pattern("^[0-9]+$").compile().unwrap();
        assert!(validator.check("123").is_ok());
        let message = validator.check("12a").unwrap_err();
        assert!(message.contains("12a"), "message should name the value: {message}");
    }

    #[test]
    fn unanchored_patterns_match_anywhere() {
        let validator = ValidatorSpec::pattern("[0-9]+").compile().unwrap();
        assert!(validator.check("abc123def").is_ok());
    }

    #[test]
    fn predicate_validator_returns_its_own_message() {
        let validator = ValidatorSpec::predicate(|value| {
            if value.len() <= 3 {
                None
            } else {
                Some(format!("{value:?} is longer than 3 characters"))
            }
        })
        .compile()
        .unwrap();
        assert!(validator.check("abc").is_ok());
        assert_eq!(
            validator.check("abcd").unwrap_err(),
            "\"abcd\" is longer than 3 characters"
        );
    }

    #[test]
    fn malformed_patterns_fail_to_compile() {
        assert!(ValidatorSpec::pattern("([0-9]+").compile().is_err());
    }

    #[test]
    fn debug_output_hides_predicate_internals() {
        let spec = ValidatorSpec::predicate(|_| None);
        assert_eq!(format!("{spec:?}"), "Predicate(..)");
    }
}
