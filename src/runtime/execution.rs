use std::collections::HashMap;
use std::rc::Rc;

use crate::builtins::BuiltinFunction;
use crate::config::RuntimeConfig;
use crate::runtime::call_registry::CallRegistry;
use crate::runtime::error::RuntimeError;
use crate::runtime::exception::{ExceptionKind, RaisedException};
use crate::runtime::object::{CallContext, CallableId};
use crate::runtime::value::Value;

pub type HostFunction = Rc<dyn Fn(&mut dyn CallContext, Vec<Value>) -> Result<Value, RuntimeError>>;

/// Ready-made embedding context: a globals table seeded with the builtins,
/// a registry of host functions, and a buffer collecting printed lines.
pub struct HostContext {
    config: RuntimeConfig,
    registry: CallRegistry<HostFunction>,
    globals: HashMap<String, Value>,
    output: Vec<String>,
}

impl HostContext {
    pub fn new(config: RuntimeConfig) -> Self {
        let mut globals = HashMap::new();
        seed_builtin_globals(&mut globals);
        Self {
            config,
            registry: CallRegistry::new(),
            globals,
            output: Vec::new(),
        }
    }

    /// Registers a host function and binds it as a global under `name`.
    pub fn define_function<F>(&mut self, name: &str, function: F) -> Value
    where
        F: Fn(&mut dyn CallContext, Vec<Value>) -> Result<Value, RuntimeError> + 'static,
    {
        let id = self.registry.register_function(Rc::new(function));
        let value = Value::Function {
            id,
            name: Rc::from(name),
        };
        self.globals.insert(name.to_string(), value.clone());
        value
    }

    pub fn globals(&self) -> &HashMap<String, Value> {
        &self.globals
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).cloned()
    }

    pub fn call_global(&mut self, name: &str, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let callee = self
            .global(name)
            .ok_or_else(|| RuntimeError::UndefinedFunction {
                name: name.to_string(),
            })?;
        callee.call(self, args)
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }
}

impl CallContext for HostContext {
    fn call_callable(
        &mut self,
        callable_id: &CallableId,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let function = self.registry.resolve(callable_id)?;
        function(self, args)
    }

    fn write_output(&mut self, line: String) {
        self.output.push(line);
    }

    fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

/// Ensures builtin callables and exception classes are present in a globals
/// table as ordinary values.
pub fn seed_builtin_globals(globals: &mut HashMap<String, Value>) {
    for builtin in BuiltinFunction::ALL {
        globals
            .entry(builtin.name().to_string())
            .or_insert(Value::Builtin(builtin));
    }
    for kind in ExceptionKind::ALL {
        globals
            .entry(kind.name().to_string())
            .or_insert(Value::ExceptionType(kind));
    }
}

/// Line reported for an exception nobody handled.
pub fn uncaught_report(exception: &RaisedException) -> String {
    format!("Exception: {exception}")
}
