use std::fmt;

use crate::config::RuntimeConfig;
use crate::runtime::error::RuntimeError;
use crate::runtime::value::Value;

/// Opaque handle to a callable owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallableId(pub u32);

impl fmt::Display for CallableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<callable:{}>", self.0)
    }
}

/// Services a builtin needs from whoever is running it.
///
/// Host-defined functions are only known to the host, so builtins that take
/// a callable (`map`, `filter`) call back through here. Printed output also
/// goes through the context instead of straight to stdout.
pub trait CallContext {
    fn call_callable(
        &mut self,
        callable_id: &CallableId,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError>;

    fn write_output(&mut self, line: String);

    fn config(&self) -> &RuntimeConfig;
}
