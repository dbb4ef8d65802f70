//! Service Context Capability
//!
//! A surface declares, by name, which capabilities its handlers expect
//! (database pools, queue clients, clocks). The composer refuses to build a
//! service whose runtime context does not cover every declared name, so a
//! missing capability is a composition error rather than a request-time
//! panic.

use std::any::Any;

/// Named capabilities a composed service makes available to its handlers.
pub trait ServiceContext: Send + Sync {
    /// Names of every capability this context provides.
    fn capability_names(&self) -> Vec<String>;

    /// Whether the context provides `name`.
    fn contains(&self, name: &str) -> bool {
        self.capability_names().iter().any(|n| n == name)
    }

    /// Downcast support for handlers that know the concrete context type.
    fn as_any(&self) -> &dyn Any;
}

/// Context providing no capabilities, for surfaces that declare none.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmptyContext;

impl ServiceContext for EmptyContext {
    fn capability_names(&self) -> Vec<String> {
        Vec::new()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedContext(Vec<String>);

    impl ServiceContext for FixedContext {
        fn capability_names(&self) -> Vec<String> {
            self.0.clone()
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn contains_checks_the_name_list() {
        let context = FixedContext(vec!["db".to_string(), "queue".to_string()]);
        assert!(context.contains("db"));
        assert!(context.contains("queue"));
        assert!(!context.contains("cache"));
    }

    #[test]
    fn empty_context_provides_nothing() {
        assert!(EmptyContext.capability_names().is_empty());
        assert!(!EmptyContext.contains("db"));
    }

    #[test]
    fn downcasting_recovers_the_concrete_type() {
        let context: Box<dyn ServiceContext> = Box::new(FixedContext(vec!["db".to_string()]));
        let concrete = context.as_any().downcast_ref::<FixedContext>();
        assert!(concrete.is_some());
    }
}
