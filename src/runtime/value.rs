use std::cmp::Ordering;
use std::rc::Rc;

use crate::builtins::BuiltinFunction;
use crate::builtins::xrange::GeneratorRef;
use crate::runtime::error::RuntimeError;
use crate::runtime::exception::{ExceptionInstance, ExceptionKind};
use crate::runtime::iteration::IteratorRef;
use crate::runtime::list::{ListObject, ListRef};
use crate::runtime::object::{CallContext, CallableId};

/// Host-native value as seen by the builtin layer.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Str(Rc<str>),
    List(ListRef),
    Tuple(Rc<[Value]>),
    Exception(Rc<ExceptionInstance>),
    ExceptionType(ExceptionKind),
    Generator(GeneratorRef),
    Iterator(IteratorRef),
    Builtin(BuiltinFunction),
    Function { id: CallableId, name: Rc<str> },
}

impl Value {
    pub fn str(value: impl AsRef<str>) -> Self {
        Self::Str(Rc::from(value.as_ref()))
    }

    pub fn list(values: Vec<Value>) -> Self {
        Self::List(ListObject::new(values).into_ref())
    }

    pub fn tuple(values: Vec<Value>) -> Self {
        Self::Tuple(Rc::from(values))
    }

    pub fn exception(kind: ExceptionKind, info: Vec<Value>) -> Self {
        Self::Exception(Rc::new(ExceptionInstance::new(kind, info)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "NoneType",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Exception(instance) => instance.kind().name(),
            Self::ExceptionType(_) => "type",
            Self::Generator(_) => "generator",
            Self::Iterator(iterator) => iterator.borrow().type_name(),
            Self::Builtin(_) => "builtin_function_or_method",
            Self::Function { .. } => "function",
        }
    }

    /// `bool` is an `int` subtype in the host language.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(value) => Some(i64::from(*value)),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(value) => *value,
            Self::Int(value) => *value != 0,
            Self::Str(value) => !value.is_empty(),
            Self::List(list) => !list.borrow().is_empty(),
            Self::Tuple(values) => !values.is_empty(),
            _ => true,
        }
    }

    pub fn repr(&self) -> String {
        match self {
            Self::None => "None".to_string(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::Int(value) => value.to_string(),
            Self::Str(value) => render_str(value),
            Self::List(list) => list.borrow().render(),
            Self::Tuple(values) => Self::render_tuple(values),
            Self::Exception(instance) => instance.representation(),
            Self::ExceptionType(kind) => format!("<class '{}'>", kind.name()),
            Self::Generator(_) => "<generator object xrange>".to_string(),
            Self::Iterator(iterator) => format!("<{} object>", iterator.borrow().type_name()),
            Self::Builtin(builtin) => format!("<built-in function {}>", builtin.name()),
            Self::Function { name, .. } => format!("<function {name}>"),
        }
    }

    /// Printed form: strings print raw, everything else in repr form.
    pub fn to_output(&self) -> String {
        match self {
            Self::Str(value) => value.to_string(),
            other => other.repr(),
        }
    }

    pub(crate) fn render_tuple(values: &[Value]) -> String {
        match values {
            [single] => format!("({},)", single.repr()),
            values => format!(
                "({})",
                values.iter().map(Value::repr).collect::<Vec<_>>().join(", ")
            ),
        }
    }

    pub fn call(
        &self,
        context: &mut dyn CallContext,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        match self {
            Self::Builtin(builtin) => crate::builtins::call_builtin(*builtin, context, args),
            Self::Function { id, .. } => context.call_callable(id, args),
            Self::ExceptionType(kind) => Ok(Self::exception(*kind, args)),
            other => Err(RuntimeError::ObjectNotCallable {
                type_name: other.type_name().to_string(),
            }),
        }
    }

    pub fn add(&self, rhs: &Value) -> Result<Value, RuntimeError> {
        match (self, rhs) {
            (Self::Str(lhs), Self::Str(rhs)) => Ok(Self::str(format!("{lhs}{rhs}"))),
            (Self::List(lhs), Self::List(rhs)) => {
                let mut values = lhs.borrow().values().to_vec();
                values.extend(rhs.borrow().iter().cloned());
                Ok(Self::list(values))
            }
            (Self::Tuple(lhs), Self::Tuple(rhs)) => {
                Ok(Self::tuple(lhs.iter().chain(rhs.iter()).cloned().collect()))
            }
            _ => match (self.as_int(), rhs.as_int()) {
                (Some(lhs), Some(rhs)) => {
                    lhs.checked_add(rhs)
                        .map(Self::Int)
                        .ok_or_else(|| RuntimeError::IntegerOverflow {
                            operation: "+".to_string(),
                        })
                }
                _ => Err(self.unsupported_operand("+", rhs)),
            },
        }
    }

    pub fn lt(&self, rhs: &Value) -> Result<bool, RuntimeError> {
        self.compare("<", rhs).map(Ordering::is_lt)
    }

    pub fn gt(&self, rhs: &Value) -> Result<bool, RuntimeError> {
        self.compare(">", rhs).map(Ordering::is_gt)
    }

    fn compare(&self, operation: &str, rhs: &Value) -> Result<Ordering, RuntimeError> {
        match (self, rhs) {
            (Self::Str(lhs), Self::Str(rhs)) => Ok(lhs.cmp(rhs)),
            _ => match (self.as_int(), rhs.as_int()) {
                (Some(lhs), Some(rhs)) => Ok(lhs.cmp(&rhs)),
                _ => Err(self.unsupported_operand(operation, rhs)),
            },
        }
    }

    fn unsupported_operand(&self, operation: &str, rhs: &Value) -> RuntimeError {
        RuntimeError::UnsupportedOperand {
            operation: operation.to_string(),
            lhs: self.type_name().to_string(),
            rhs: rhs.type_name().to_string(),
        }
    }
}

/// Quotes with `'` unless the text holds a `'` and no `"`.
fn render_str(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut rendered = String::with_capacity(value.len() + 2);
    rendered.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => rendered.push_str("\\\\"),
            '\n' => rendered.push_str("\\n"),
            '\r' => rendered.push_str("\\r"),
            '\t' => rendered.push_str("\\t"),
            ch if ch == quote => {
                rendered.push('\\');
                rendered.push(ch);
            }
            ch if ch.is_control() => rendered.push_str(&format!("\\x{:02x}", ch as u32)),
            ch => rendered.push(ch),
        }
    }
    rendered.push(quote);
    rendered
}

#[cfg(test)]
mod tests {
    use super::Value;
    use crate::builtins::BuiltinFunction;
    use crate::runtime::error::RuntimeError;
    use crate::runtime::exception::ExceptionKind;

    #[test]
    fn renders_scalars_like_the_host_language() {
        assert_eq!(Value::None.repr(), "None");
        assert_eq!(Value::Bool(true).repr(), "True");
        assert_eq!(Value::Int(-7).repr(), "-7");
        assert_eq!(Value::str("bad").repr(), "'bad'");
        assert_eq!(Value::str("it's").repr(), "\"it's\"");
        assert_eq!(Value::str("a'b\"c").repr(), "'a\\'b\"c'");
        assert_eq!(Value::str("line\n").repr(), "'line\\n'");
        assert_eq!(Value::str("bad").to_output(), "bad");
    }

    #[test]
    fn renders_containers_and_callables() {
        assert_eq!(Value::tuple(vec![Value::Int(1)]).repr(), "(1,)");
        assert_eq!(Value::tuple(vec![]).repr(), "()");
        assert_eq!(
            Value::list(vec![Value::Int(1), Value::str("a")]).repr(),
            "[1, 'a']"
        );
        assert_eq!(
            Value::ExceptionType(ExceptionKind::AssertionError).repr(),
            "<class 'AssertionError'>"
        );
        assert_eq!(
            Value::Builtin(BuiltinFunction::Map).repr(),
            "<built-in function map>"
        );
    }

    #[test]
    fn truthiness_follows_emptiness_and_zero() {
        assert!(!Value::None.is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::str("").is_truthy());
        assert!(!Value::list(vec![]).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(Value::tuple(vec![Value::None]).is_truthy());
        assert!(Value::exception(ExceptionKind::Exception, vec![]).is_truthy());
    }

    #[test]
    fn adds_ints_strings_and_sequences() {
        let sum = Value::Int(2).add(&Value::Bool(true)).expect("int + bool");
        assert_eq!(sum.repr(), "3");
        let joined = Value::str("ab").add(&Value::str("c")).expect("str + str");
        assert_eq!(joined.repr(), "'abc'");
        let lhs = Value::list(vec![Value::Int(1)]);
        let joined = lhs.add(&lhs).expect("list + list");
        assert_eq!(joined.repr(), "[1, 1]");
        assert_eq!(lhs.repr(), "[1]");
    }

    #[test]
    fn reports_unsupported_operands_and_overflow() {
        assert_eq!(
            Value::Int(1)
                .add(&Value::str("a"))
                .expect_err("int + str should fail"),
            RuntimeError::UnsupportedOperand {
                operation: "+".to_string(),
                lhs: "int".to_string(),
                rhs: "str".to_string(),
            }
        );
        assert_eq!(
            Value::Int(i64::MAX)
                .add(&Value::Int(1))
                .expect_err("overflow should fail"),
            RuntimeError::IntegerOverflow {
                operation: "+".to_string()
            }
        );
        assert!(Value::None.lt(&Value::Int(1)).is_err());
    }

    #[test]
    fn compares_ints_and_strings() {
        assert!(Value::Int(1).lt(&Value::Int(2)).expect("int < int"));
        assert!(Value::Int(3).gt(&Value::Bool(false)).expect("int > bool"));
        assert!(Value::str("b").gt(&Value::str("a")).expect("str > str"));
        assert!(!Value::Int(2).lt(&Value::Int(2)).expect("int < int"));
    }

    #[test]
    fn exception_types_construct_instances() {
        struct NoCalls(crate::config::RuntimeConfig);

        impl crate::runtime::object::CallContext for NoCalls {
            fn call_callable(
                &mut self,
                _callable_id: &crate::runtime::object::CallableId,
                _args: Vec<Value>,
            ) -> Result<Value, RuntimeError> {
                panic!("unexpected call in value tests")
            }

            fn write_output(&mut self, _line: String) {}

            fn config(&self) -> &crate::config::RuntimeConfig {
                &self.0
            }
        }

        let mut context = NoCalls(Default::default());
        let instance = Value::ExceptionType(ExceptionKind::AssertionError)
            .call(&mut context, vec![Value::str("bad")])
            .expect("construct exception");
        assert_eq!(instance.type_name(), "AssertionError");
        assert_eq!(instance.repr(), "AssertionError: 'bad'");
        assert_eq!(
            Value::Int(1)
                .call(&mut context, vec![])
                .expect_err("int is not callable"),
            RuntimeError::ObjectNotCallable {
                type_name: "int".to_string()
            }
        );
    }
}
