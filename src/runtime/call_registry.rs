use std::collections::HashMap;

use crate::runtime::error::RuntimeError;
use crate::runtime::object::CallableId;

/// Callable registry used for runtime `CallableId` dispatch.
///
/// Host functions are stored as backend-owned payloads and handed out by id.
pub(crate) struct CallRegistry<F> {
    next_callable_id: u32,
    callables_by_id: HashMap<u32, F>,
}

impl<F> CallRegistry<F> {
    /// Creates an empty registry.
    pub(crate) fn new() -> Self {
        Self {
            next_callable_id: 1,
            callables_by_id: HashMap::new(),
        }
    }

    /// Registers a callable and returns a freshly allocated `CallableId`.
    pub(crate) fn register_function(&mut self, function: F) -> CallableId {
        let callable_id = CallableId(self.next_callable_id);
        self.next_callable_id = self
            .next_callable_id
            .checked_add(1)
            .expect("callable id overflow");
        self.callables_by_id.insert(callable_id.0, function);
        callable_id
    }
}

impl<F: Clone> CallRegistry<F> {
    /// Resolves a `CallableId` to its registered payload.
    pub(crate) fn resolve(&self, callable_id: &CallableId) -> Result<F, RuntimeError> {
        self.callables_by_id
            .get(&callable_id.0)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: callable_id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::CallRegistry;
    use crate::runtime::error::RuntimeError;
    use crate::runtime::object::CallableId;

    #[test]
    fn allocates_increasing_ids() {
        let mut registry = CallRegistry::new();
        let first = registry.register_function("first");
        let second = registry.register_function("second");
        assert_eq!(first, CallableId(1));
        assert_eq!(second, CallableId(2));
        assert_eq!(registry.resolve(&second).expect("registered"), "second");
    }

    #[test]
    fn unknown_ids_are_undefined_functions() {
        let registry = CallRegistry::<&str>::new();
        assert_eq!(
            registry
                .resolve(&CallableId(9))
                .expect_err("nothing registered"),
            RuntimeError::UndefinedFunction {
                name: "<callable:9>".to_string()
            }
        );
    }
}
