//! Builtin exception hierarchy.
//!
//! `Exception` is the base; `StopIteration` is the same thing under a distinct
//! type and serves as the end-of-iteration signal; `AssertionError` only
//! changes the class name its representation uses. Instances carry their
//! constructor arguments verbatim as an immutable payload.

use std::fmt;
use std::rc::Rc;

use crate::runtime::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    Exception,
    StopIteration,
    AssertionError,
}

impl ExceptionKind {
    pub const ALL: [ExceptionKind; 3] = [
        ExceptionKind::Exception,
        ExceptionKind::StopIteration,
        ExceptionKind::AssertionError,
    ];

    /// Class name, used for type identity and lookup.
    pub fn name(self) -> &'static str {
        match self {
            Self::Exception => "Exception",
            Self::StopIteration => "StopIteration",
            Self::AssertionError => "AssertionError",
        }
    }

    /// Name handed to `exc_str` by the class's representation hook.
    ///
    /// `StopIteration` does not override the hook, so it inherits the base
    /// class's `"Exception"`.
    pub fn repr_name(self) -> &'static str {
        match self {
            Self::Exception | Self::StopIteration => "Exception",
            Self::AssertionError => "AssertionError",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn is_stop_iteration(self) -> bool {
        self == Self::StopIteration
    }
}

#[derive(Debug)]
pub struct ExceptionInstance {
    kind: ExceptionKind,
    info: Vec<Value>,
}

impl ExceptionInstance {
    pub fn new(kind: ExceptionKind, info: Vec<Value>) -> Self {
        Self { kind, info }
    }

    pub fn kind(&self) -> ExceptionKind {
        self.kind
    }

    pub fn info(&self) -> &[Value] {
        &self.info
    }

    /// Shared formatting routine behind every variant's representation.
    ///
    /// Two or more payload values render as the representation of the
    /// payload tuple, e.g. `Exception: (1, 'two')`.
    pub fn exc_str(&self, name: &str) -> String {
        match self.info.as_slice() {
            [] => name.to_string(),
            [value] => format!("{name}: {}", value.repr()),
            values => format!("{name}: {}", Value::render_tuple(values)),
        }
    }

    pub fn representation(&self) -> String {
        self.exc_str(self.kind.repr_name())
    }
}

/// An exception instance travelling through the error channel.
#[derive(Debug, Clone)]
pub struct RaisedException {
    instance: Rc<ExceptionInstance>,
}

impl RaisedException {
    pub fn new(kind: ExceptionKind, info: Vec<Value>) -> Self {
        Self::from_instance(Rc::new(ExceptionInstance::new(kind, info)))
    }

    pub fn from_instance(instance: Rc<ExceptionInstance>) -> Self {
        Self { instance }
    }

    pub fn stop_iteration() -> Self {
        Self::new(ExceptionKind::StopIteration, Vec::new())
    }

    pub fn kind(&self) -> ExceptionKind {
        self.instance.kind()
    }

    pub fn instance(&self) -> &Rc<ExceptionInstance> {
        &self.instance
    }

    pub fn is_stop_iteration(&self) -> bool {
        self.kind().is_stop_iteration()
    }
}

impl PartialEq for RaisedException {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.instance, &other.instance)
    }
}

impl fmt::Display for RaisedException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.instance.representation())
    }
}
