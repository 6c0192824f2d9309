//! Builtin function table and dispatch.
pub mod aggregate;
pub mod range;
pub mod transform;
pub mod xrange;

pub use aggregate::sum;
pub use range::{RangeParameters, range};
pub use transform::{filter, map};
pub use xrange::{GeneratorState, LazyRange, Resumption, xrange};

use crate::runtime::error::RuntimeError;
use crate::runtime::iteration::{get_iter, next_value};
use crate::runtime::object::CallContext;
use crate::runtime::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    Print,
    Len,
    Repr,
    Iter,
    Next,
    Map,
    Filter,
    Sum,
    Range,
    Xrange,
}

impl BuiltinFunction {
    pub const ALL: [BuiltinFunction; 10] = [
        BuiltinFunction::Print,
        BuiltinFunction::Len,
        BuiltinFunction::Repr,
        BuiltinFunction::Iter,
        BuiltinFunction::Next,
        BuiltinFunction::Map,
        BuiltinFunction::Filter,
        BuiltinFunction::Sum,
        BuiltinFunction::Range,
        BuiltinFunction::Xrange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Print => "print",
            Self::Len => "len",
            Self::Repr => "repr",
            Self::Iter => "iter",
            Self::Next => "next",
            Self::Map => "map",
            Self::Filter => "filter",
            Self::Sum => "sum",
            Self::Range => "range",
            Self::Xrange => "xrange",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }
}

pub fn call_builtin(
    builtin: BuiltinFunction,
    context: &mut dyn CallContext,
    args: Vec<Value>,
) -> Result<Value, RuntimeError> {
    match builtin {
        BuiltinFunction::Print => {
            let rendered = args.iter().map(Value::to_output).collect::<Vec<_>>();
            context.write_output(rendered.join(" "));
            Ok(Value::None)
        }
        BuiltinFunction::Len => {
            RuntimeError::expect_function_arity("len", 1, args.len())?;
            len(&args[0])
        }
        BuiltinFunction::Repr => {
            RuntimeError::expect_function_arity("repr", 1, args.len())?;
            Ok(Value::str(args[0].repr()))
        }
        BuiltinFunction::Iter => {
            RuntimeError::expect_function_arity("iter", 1, args.len())?;
            get_iter(&args[0])
        }
        BuiltinFunction::Next => {
            RuntimeError::expect_function_arity("next", 1, args.len())?;
            next_value(&args[0])
        }
        BuiltinFunction::Map => {
            RuntimeError::expect_function_arity("map", 2, args.len())?;
            map(context, &args[0], &args[1])
        }
        BuiltinFunction::Filter => {
            RuntimeError::expect_function_arity("filter", 2, args.len())?;
            filter(context, &args[0], &args[1])
        }
        BuiltinFunction::Sum => {
            RuntimeError::expect_function_arity_range("sum", 1, 2, args.len())?;
            let mut args = args.into_iter();
            let iterable = args.next().unwrap_or(Value::None);
            sum(&iterable, args.next().unwrap_or(Value::Int(0)))
        }
        BuiltinFunction::Range => range(context, &args),
        BuiltinFunction::Xrange => xrange(&args),
    }
}

fn len(value: &Value) -> Result<Value, RuntimeError> {
    let len = match value {
        Value::List(list) => list.borrow().__len__(),
        Value::Tuple(values) => values.len(),
        Value::Str(text) => text.chars().count(),
        other => {
            return Err(RuntimeError::InvalidArgumentType {
                operation: "len".to_string(),
                argument: "obj".to_string(),
                expected: "sized".to_string(),
                got: other.type_name().to_string(),
            });
        }
    };
    Ok(Value::Int(len as i64))
}
