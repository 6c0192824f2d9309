//! Host-side object model the builtins run against.
//!
//! Values, the exception hierarchy, the iteration protocol, and the
//! `CallContext` seam through which builtins reach host callables and
//! printed output.
pub(crate) mod call_registry;
pub mod error;
pub mod exception;
pub mod execution;
pub mod iteration;
pub mod list;
pub mod object;
pub mod value;
